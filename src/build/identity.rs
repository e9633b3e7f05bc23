//! 构建标识（随机消歧串）

use crate::error::{Result, SwitchError};
use std::fmt;
use std::str::FromStr;

pub const BUILD_IDENTITY_LEN: usize = 64;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 每个配置对象在构造时生成一次，之后不可变。
///
/// 并行实验中 `switch_id` 可能重复，构建目录和产物路径都带上它以避免冲突。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildIdentity(String);

impl BuildIdentity {
    pub fn random() -> Self {
        Self::with_rng(&mut fastrand::Rng::new())
    }

    pub fn with_rng(rng: &mut fastrand::Rng) -> Self {
        let token = (0..BUILD_IDENTITY_LEN)
            .map(|_| CHARSET[rng.usize(..CHARSET.len())] as char)
            .collect();
        BuildIdentity(token)
    }

    /// 解析之前打印出的标识，用于之后引用同一次构建
    pub fn parse(raw: &str) -> Result<Self> {
        let valid = raw.len() == BUILD_IDENTITY_LEN && raw.bytes().all(|b| CHARSET.contains(&b));
        if valid {
            Ok(BuildIdentity(raw.to_string()))
        } else {
            Err(SwitchError::InvalidBuildIdentity(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BuildIdentity {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self> {
        BuildIdentity::parse(s)
    }
}

impl fmt::Display for BuildIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
