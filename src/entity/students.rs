//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_no: String,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub class_id: i64,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::scores::Entity")]
    Scores,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，`class_name` 由调用方关联查询得到
    ///
    /// 性别值无法识别时返回错误，与统计查询的处理一致。
    pub fn into_student(
        self,
        class_name: Option<String>,
    ) -> crate::errors::Result<crate::models::students::entities::Student> {
        use crate::models::students::entities::{Gender, Student};
        use chrono::{DateTime, Utc};

        Ok(Student {
            id: self.id,
            student_no: self.student_no,
            name: self.name,
            gender: Gender::from_stored(&self.gender)?,
            age: self.age,
            class_id: self.class_id,
            class_name,
            phone: self.phone,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
