//! User Entity Implementation
//!
//! 백오피스 사용자 엔티티와 역할 정의입니다.
//! MongoDB `users` 컬렉션의 문서 구조와 일치합니다.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 정확히 두 가지 값만 존재하며 저장/직렬화 시 대문자로 표기됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// 대문자 표기(`USER`, `ADMIN`)만 허용합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unsupported role: {}", other)),
        }
    }
}

/// 사용자 엔티티
///
/// 로그인 자격 증명과 현재 유효한 리프레시 토큰을 함께 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 소문자 정규화)
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    /// 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// 가장 최근에 발급된 리프레시 토큰. 로그아웃 후에는 None
    ///
    /// 새 로그인이 이 값을 덮어쓰므로 사용자당 활성 리프레시 토큰은 하나뿐입니다.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// ID는 저장소에 저장될 때 할당됩니다.
    pub fn new(email: String, password_hash: String, name: Option<String>, role: Role) -> Self {
        Self {
            id: None,
            email,
            password_hash,
            name,
            role,
            refresh_token: None,
            created_at: DateTime::now(),
        }
    }

    /// ID를 16진수 문자열로 반환
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
