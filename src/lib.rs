//! 学籍管理系统后端服务
//!
//! 基于 Actix Web 构建的学生、班级、课程与成绩管理后端。
//!
//! # 架构
//! - `aggregation`: 仪表盘统计计算
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `roster`: 班级人数维护（成员变动检测与重新计数）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod aggregation;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod roster;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
