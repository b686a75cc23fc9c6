use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生性别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum Gender {
    Male,   // 男
    Female, // 女
}

impl Gender {
    pub const MALE: &'static str = "male";
    pub const FEMALE: &'static str = "female";

    /// 解析库中存储的性别，兼容旧数据中的 "男"/"女"
    pub fn from_stored(raw: &str) -> crate::errors::Result<Self> {
        raw.trim().parse().map_err(|_| {
            crate::errors::RecordsError::database_operation(format!(
                "学生记录中的性别值无效: '{raw}'"
            ))
        })
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!("无效的性别: '{s}'. 支持的取值: male, female"))
        })
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "{}", Gender::MALE),
            Gender::Female => write!(f, "{}", Gender::FEMALE),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    // 兼容旧数据中的中文取值
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Gender::MALE | "男" => Ok(Gender::Male),
            Gender::FEMALE | "女" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    // 学号
    pub student_no: String,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    // 所属班级
    pub class_id: i64,
    pub class_name: Option<String>,
    pub phone: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_accepts_legacy_labels() {
        assert_eq!("男".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("女".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::Female.to_string(), "female");
    }

    #[test]
    fn test_stored_gender_is_normalised() {
        assert_eq!(Gender::from_stored(" 女 ").unwrap(), Gender::Female);
        assert_eq!(Gender::from_stored("male").unwrap(), Gender::Male);

        let err = Gender::from_stored("other").unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[test]
    fn test_gender_rejects_unknown() {
        assert!(serde_json::from_str::<Gender>(r#""other""#).is_err());
    }
}
