//! 目录文本加载
//!
//! 普通文件直接按UTF-8读取；`.zip` / `.epub` 等打包文件通过zip打开，
//! 读取指定条目或第一个 `.ncx` 条目。

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::toc::error::{Result, TocError};

/// 按打包格式处理的扩展名
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "epub"];

/// 判断路径是否为打包文件
pub fn is_archive<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ARCHIVE_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// 列出打包文件中所有 `.ncx` 条目
///
/// # 参数
/// * `path` - 打包文件路径
///
/// # 返回值
/// * `Result<Vec<String>>` - 条目名称，按包内顺序
pub fn list_ncx_entries<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entries = Vec::new();

    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        if file.name().to_lowercase().ends_with(".ncx") {
            entries.push(file.name().to_string());
        }
    }

    Ok(entries)
}

/// 读取目录文本
///
/// # 参数
/// * `path` - NCX文件或打包文件路径
/// * `entry` - 打包文件内的条目名；为 `None` 时取第一个 `.ncx` 条目，普通文件忽略此参数
///
/// # 返回值
/// * `Result<String>` - NCX的XML文本
pub fn load_toc_text<P: AsRef<Path>>(path: P, entry: Option<&str>) -> Result<String> {
    let path = path.as_ref();
    if !is_archive(path) {
        return Ok(fs::read_to_string(path)?);
    }

    let entry_name = match entry {
        Some(name) => name.to_string(),
        None => list_ncx_entries(path)?
            .into_iter()
            .next()
            .ok_or_else(|| TocError::NcxNotFound(path.display().to_string()))?,
    };

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut toc_file = archive.by_name(&entry_name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => {
            TocError::NcxNotFound(format!("{}: {}", path.display(), entry_name))
        }
        other => TocError::Zip(other),
    })?;

    log::debug!("从 {} 读取条目 {}", path.display(), entry_name);

    let mut content = String::new();
    toc_file.read_to_string(&mut content)?;
    Ok(content)
}
