use crate::entity::{classes, students};
use crate::errors::{RecordsError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use tracing::debug;

/// 重新统计班级人数并写回 `student_count`
///
/// 只更新这一列，不触碰班级的其他字段和 `updated_at`。
/// `class_id` 为 `None` 时什么也不做；返回写入后的人数。
pub async fn recount_class<C: ConnectionTrait>(
    conn: &C,
    class_id: Option<i64>,
) -> Result<Option<i64>> {
    let Some(class_id) = class_id else {
        return Ok(None);
    };

    let count = students::Entity::find()
        .filter(students::Column::ClassId.eq(class_id))
        .count(conn)
        .await
        .map_err(|e| {
            RecordsError::roster_maintenance(format!("统计班级 {class_id} 人数失败: {e}"))
        })? as i64;

    let result = classes::Entity::update_many()
        .col_expr(classes::Column::StudentCount, Expr::value(count))
        .filter(classes::Column::Id.eq(class_id))
        .exec(conn)
        .await
        .map_err(|e| {
            RecordsError::roster_maintenance(format!("写回班级 {class_id} 人数失败: {e}"))
        })?;

    // MySQL 在值未变化时可能返回 0 行，需要再确认班级是否存在
    if result.rows_affected == 0 {
        let exists = classes::Entity::find_by_id(class_id)
            .count(conn)
            .await
            .map_err(|e| RecordsError::roster_maintenance(e.to_string()))?
            > 0;
        if !exists {
            return Err(RecordsError::roster_maintenance(format!(
                "班级 {class_id} 不存在，无法更新人数"
            )));
        }
    }

    debug!("班级 {} 人数重新统计为 {}", class_id, count);
    Ok(Some(count))
}

/// 重新统计所有班级的人数，返回处理的班级数量
pub async fn recount_all_classes<C: ConnectionTrait>(conn: &C) -> Result<usize> {
    let class_ids: Vec<i64> = classes::Entity::find()
        .select_only()
        .column(classes::Column::Id)
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| RecordsError::roster_maintenance(format!("读取班级列表失败: {e}")))?;

    for class_id in &class_ids {
        recount_class(conn, Some(*class_id)).await?;
    }

    Ok(class_ids.len())
}
