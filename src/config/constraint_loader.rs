// ==========================================
// 铁路装车编组计划 - 约束配置加载器
// ==========================================
// 职责: 从 JSON 文件加载站点级约束覆写
// 路径优先级: 显式路径 > 环境变量 > 用户配置目录
// 文件不存在视为 "无覆写" (全部使用约束目录默认值)
// ==========================================

use crate::config::catalog::resolve_constraints;
use crate::config::error::{ConfigResult, ConstraintConfigError};
use crate::domain::constraint::ConstraintSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 环境变量: 约束配置文件路径
pub const CONSTRAINTS_PATH_ENV: &str = "RAIL_RAKE_APS_CONSTRAINTS";

/// 配置文件名
pub const CONSTRAINTS_FILE_NAME: &str = "constraints.json";

// ==========================================
// ConstraintConfigLoader - 约束配置加载器
// ==========================================
pub struct ConstraintConfigLoader {
    path: PathBuf,
}

impl ConstraintConfigLoader {
    /// 使用显式路径创建加载器
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用默认位置创建加载器
    pub fn from_default_location() -> Self {
        Self::new(default_constraints_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载约束覆写集
    ///
    /// # 返回
    /// - Ok(ConstraintSet): 文件内容 (文件不存在时为空集)
    /// - Err: 读取失败 / JSON 格式错误 / 阈值无效
    ///
    /// # 说明
    /// 加载后立即做一次解析校验, 无效配置在加载时就暴露, 而不是在第一次校验计划时
    pub fn load(&self) -> ConfigResult<ConstraintSet> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "约束配置文件不存在, 使用默认阈值");
            return Ok(ConstraintSet::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "约束配置文件读取失败");
            ConstraintConfigError::ReadError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let set = Self::parse_str(&raw)?;
        resolve_constraints(&set)?;

        info!(path = %self.path.display(), "约束配置加载完成");
        Ok(set)
    }

    /// 解析 JSON 文本
    ///
    /// 空白文本视为空集; 非数值阈值 (如字符串) 在此处被拒绝
    pub fn parse_str(raw: &str) -> ConfigResult<ConstraintSet> {
        if raw.trim().is_empty() {
            debug!("约束配置内容为空, 使用默认阈值");
            return Ok(ConstraintSet::default());
        }

        serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "约束配置 JSON 解析失败");
            ConstraintConfigError::ParseError(e.to_string())
        })
    }

    /// 保存约束覆写集 (格式化 JSON)
    pub fn save(&self, set: &ConstraintSet) -> ConfigResult<()> {
        resolve_constraints(set)?;

        let json = serde_json::to_string_pretty(set)
            .map_err(|e| ConstraintConfigError::ParseError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConstraintConfigError::ReadError {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }
        }

        fs::write(&self.path, json).map_err(|e| ConstraintConfigError::ReadError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %self.path.display(), "约束配置已保存");
        Ok(())
    }
}

/// 默认约束配置路径
///
/// 1. 环境变量 RAIL_RAKE_APS_CONSTRAINTS (便于调试/测试/CI)
/// 2. 用户配置目录/rail-rake-aps/constraints.json
/// 3. 当前目录 ./constraints.json
pub fn default_constraints_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONSTRAINTS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("rail-rake-aps").join(CONSTRAINTS_FILE_NAME),
        None => PathBuf::from(".").join(CONSTRAINTS_FILE_NAME),
    }
}
