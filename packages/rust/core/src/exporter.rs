//! Region document writer.
//!
//! Writes each [`RegionTree`] to `<out_dir>/<region name>.json`, replacing
//! any previous file of the same name. Children keep insertion order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use regiontree_shared::{RegionTree, RegionTreeError, Result};

/// Output formatting options.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Two-space indented JSON instead of a single line.
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Write a single region document and return its path.
#[instrument(skip_all, fields(region = %tree.name))]
pub fn export_region(out_dir: &Path, tree: &RegionTree, options: &ExportOptions) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| RegionTreeError::io(out_dir, e))?;

    let file_name = document_name(&tree.name);
    let target = out_dir.join(&file_name);
    let temp = out_dir.join(format!(".{file_name}.tmp"));

    let json = if options.pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    }
    .map_err(|e| RegionTreeError::Serialization(e.to_string()))?;

    // Write to temp file first, then rename over the target
    std::fs::write(&temp, json).map_err(|e| RegionTreeError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| RegionTreeError::io(&target, e))?;

    info!(
        path = %target.display(),
        districts = tree.children.len(),
        localities = tree.leaf_count(),
        "wrote region document"
    );

    Ok(target)
}

/// Write every region, in map order.
#[instrument(skip_all, fields(out_dir = %out_dir.display(), regions = regions.len()))]
pub fn export_all(
    out_dir: &Path,
    regions: &BTreeMap<String, RegionTree>,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(regions.len());
    for tree in regions.values() {
        written.push(export_region(out_dir, tree, options)?);
    }
    debug!(count = written.len(), "export complete");
    Ok(written)
}

/// File name for a region's document. Path separators are replaced so a
/// name can never escape the output directory.
pub fn document_name(region: &str) -> String {
    let safe: String = region
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use regiontree_shared::{DistrictNode, LocalityLeaf};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "regiontree-exporter-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn seoul() -> RegionTree {
        RegionTree {
            code: "11".into(),
            name: "서울특별시".into(),
            children: vec![
                DistrictNode {
                    code: "11140".into(),
                    name: "중구".into(),
                    children: vec![LocalityLeaf {
                        code: "1114010100".into(),
                        name: "무교동".into(),
                    }],
                },
                DistrictNode {
                    code: "11110".into(),
                    name: "종로구".into(),
                    children: vec![],
                },
            ],
        }
    }

    #[test]
    fn writes_region_named_document() {
        let tmp = temp_dir();
        let path = export_region(&tmp, &seoul(), &ExportOptions::default()).unwrap();

        assert_eq!(path, tmp.join("서울특별시.json"));
        let parsed: RegionTree =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, seoul());

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn preserves_child_order_and_shape() {
        let tmp = temp_dir();
        let path = export_region(&tmp, &seoul(), &ExportOptions::default()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        // Not re-sorted by code: 중구 (11140) stays ahead of 종로구 (11110).
        let jung = content.find("중구").unwrap();
        let jongno = content.find("종로구").unwrap();
        assert!(jung < jongno);

        // Raw UTF-8, two-space indent, leaves without children.
        assert!(content.contains("\"name\": \"서울특별시\""));
        assert!(content.starts_with("{\n  \"code\": \"11\""));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["children"][0]["children"][0].get("children").is_none());
        assert_eq!(value["children"][1]["children"], serde_json::json!([]));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn compact_output() {
        let tmp = temp_dir();
        let path = export_region(&tmp, &seoul(), &ExportOptions { pretty: false }).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains('\n'));
        assert!(content.starts_with(r#"{"code":"11","name":"서울특별시","children":["#));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn overwrites_existing_document() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("서울특별시.json"), "stale").unwrap();

        export_region(&tmp, &seoul(), &ExportOptions::default()).unwrap();
        let content = std::fs::read_to_string(tmp.join("서울특별시.json")).unwrap();
        assert!(content.contains("무교동"));
        assert!(!tmp.join(".서울특별시.json.tmp").exists());

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn export_all_creates_directory() {
        let tmp = temp_dir().join("nested").join("out");
        let mut regions = BTreeMap::new();
        regions.insert("서울특별시".to_string(), seoul());
        regions.insert(
            "경기도".to_string(),
            RegionTree {
                code: "41".into(),
                name: "경기도".into(),
                children: vec![],
            },
        );

        let written = export_all(&tmp, &regions, &ExportOptions::default()).unwrap();
        assert_eq!(written, vec![tmp.join("경기도.json"), tmp.join("서울특별시.json")]);
        assert!(written.iter().all(|p| p.exists()));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn document_name_strips_separators() {
        assert_eq!(document_name("경기도 수원시"), "경기도 수원시.json");
        assert_eq!(document_name("../etc"), ".._etc.json");
    }
}
