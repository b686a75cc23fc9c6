/// 一次学生写入对班级成员关系造成的变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    /// 新学生加入班级
    Inserted { class_id: i64 },
    /// 学生从 `from` 调到 `to`
    Reassigned { from: i64, to: i64 },
    /// 更新没有改动班级
    Unchanged { class_id: i64 },
    /// 学生被删除
    Removed { class_id: i64 },
}

impl MembershipChange {
    /// 根据写入前后的班级引用分类一次保存
    ///
    /// 更新时如果没有读到旧的班级引用，按新增处理，只重算当前班级。
    pub fn on_save(previous_class_id: Option<i64>, current_class_id: i64, is_new: bool) -> Self {
        match (is_new, previous_class_id) {
            (true, _) | (false, None) => MembershipChange::Inserted {
                class_id: current_class_id,
            },
            (false, Some(previous)) if previous != current_class_id => {
                MembershipChange::Reassigned {
                    from: previous,
                    to: current_class_id,
                }
            }
            (false, Some(_)) => MembershipChange::Unchanged {
                class_id: current_class_id,
            },
        }
    }

    pub fn on_delete(class_id: i64) -> Self {
        MembershipChange::Removed { class_id }
    }

    /// 需要重新计数的班级：(旧班级, 新班级)
    pub fn affected_classes(&self) -> (Option<i64>, Option<i64>) {
        match *self {
            MembershipChange::Inserted { class_id } => (None, Some(class_id)),
            MembershipChange::Reassigned { from, to } => (Some(from), Some(to)),
            MembershipChange::Unchanged { .. } => (None, None),
            MembershipChange::Removed { class_id } => (Some(class_id), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_affects_new_class_only() {
        let change = MembershipChange::on_save(None, 3, true);
        assert_eq!(change, MembershipChange::Inserted { class_id: 3 });
        assert_eq!(change.affected_classes(), (None, Some(3)));
    }

    #[test]
    fn test_update_with_different_class_affects_both() {
        let change = MembershipChange::on_save(Some(1), 2, false);
        assert_eq!(change, MembershipChange::Reassigned { from: 1, to: 2 });
        assert_eq!(change.affected_classes(), (Some(1), Some(2)));
    }

    #[test]
    fn test_update_with_same_class_affects_none() {
        let change = MembershipChange::on_save(Some(4), 4, false);
        assert_eq!(change, MembershipChange::Unchanged { class_id: 4 });
        assert_eq!(change.affected_classes(), (None, None));
    }

    #[test]
    fn test_update_without_previous_class_treated_as_insert() {
        let change = MembershipChange::on_save(None, 7, false);
        assert_eq!(change.affected_classes(), (None, Some(7)));
    }

    #[test]
    fn test_delete_affects_old_class() {
        let change = MembershipChange::on_delete(5);
        assert_eq!(change.affected_classes(), (Some(5), None));
    }
}
