//! 班级花名册维护
//!
//! 保证 `classes.student_count` 始终等于引用该班级的学生数量。
//! 学生的新增、调班和删除由存储层在同一事务内显式调用本模块：
//!
//! - [`MembershipChange`] 根据写入前后的班级引用判断哪些班级需要重新计数
//! - [`recount_class`] 重新统计并只写回 `student_count` 一列

mod counter;
mod detector;

pub use counter::{recount_all_classes, recount_class};
pub use detector::MembershipChange;

use crate::entity::students;
use crate::errors::Result;
use sea_orm::ConnectionTrait;

/// 学生写入成功后调用
///
/// `previous_class_id` 是写入前从数据库读到的班级引用，新建学生时为 `None`。
pub async fn on_student_saved<C: ConnectionTrait>(
    conn: &C,
    previous_class_id: Option<i64>,
    student: &students::Model,
    is_new: bool,
) -> Result<MembershipChange> {
    let change = MembershipChange::on_save(previous_class_id, student.class_id, is_new);
    apply(conn, &change).await?;
    Ok(change)
}

/// 学生删除成功后调用
pub async fn on_student_deleted<C: ConnectionTrait>(
    conn: &C,
    student: &students::Model,
) -> Result<MembershipChange> {
    let change = MembershipChange::on_delete(student.class_id);
    apply(conn, &change).await?;
    Ok(change)
}

async fn apply<C: ConnectionTrait>(conn: &C, change: &MembershipChange) -> Result<()> {
    let (old, new) = change.affected_classes();
    recount_class(conn, old).await?;
    recount_class(conn, new).await?;
    Ok(())
}
