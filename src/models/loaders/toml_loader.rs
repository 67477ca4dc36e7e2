use crate::models::submission::{Submission, SubmissionManifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载提交清单
pub async fn load_submission_manifest(toml_file_path: &Path) -> Result<SubmissionManifest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let manifest: SubmissionManifest = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    Ok(manifest.with_manifest_path(toml_file_path.to_path_buf()))
}

/// 读取清单指向的文档，组装成一次提交
pub async fn load_submission(manifest: &SubmissionManifest) -> Result<Submission> {
    let document_path = manifest.document_path();
    let document = fs::read(&document_path)
        .await
        .with_context(|| format!("无法读取文档: {}", document_path.display()))?;

    Ok(Submission::new(
        manifest.file_name(),
        document,
        manifest.identity.clone(),
        manifest.term.clone(),
    ))
}

/// 从文件夹中加载所有提交清单
///
/// 无法解析的清单记录警告后跳过，结果按文件路径排序
pub async fn load_all_submissions(folder_path: &str) -> Result<Vec<SubmissionManifest>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut manifests = Vec::with_capacity(toml_files.len());
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_submission_manifest(&path).await {
            Ok(manifest) => manifests.push(manifest),
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(manifests)
}
