use crate::model::Student;
use crate::store::Store;
use anyhow::{anyhow, Context};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use uuid::Uuid;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const MANIFEST_ENTRY: &str = "manifest.json";
const STUDENTS_ENTRY: &str = "slots/students.json";
const COURSES_ENTRY: &str = "slots/courses.json";
pub const BUNDLE_FORMAT_V1: &str = "rollbook-workspace-v1";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_format: String,
    pub bundle_id: String,
    pub entry_count: usize,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Writes both collections, in their slot JSON form, into a zip bundle.
pub fn export_bundle(store: &Store, out_path: &Path) -> anyhow::Result<ExportSummary> {
    let (students_json, courses_json) = store.to_json()?;

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }
    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let bundle_id = Uuid::new_v4().to_string();
    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "bundleId": bundle_id,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportedAt": chrono::Utc::now().to_rfc3339(),
        "checksums": {
            (STUDENTS_ENTRY): sha256_hex(students_json.as_bytes()),
            (COURSES_ENTRY): sha256_hex(courses_json.as_bytes()),
        },
    });
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    for (entry, body) in [(STUDENTS_ENTRY, &students_json), (COURSES_ENTRY, &courses_json)] {
        zip.start_file(entry, opts)
            .with_context(|| format!("failed to start {} entry", entry))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("failed to write {} entry", entry))?;
    }

    zip.finish().context("failed to finalize zip bundle")?;

    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        bundle_id,
        entry_count: 3,
    })
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> anyhow::Result<String> {
    let mut text = String::new();
    archive
        .by_name(name)
        .with_context(|| format!("bundle missing {}", name))?
        .read_to_string(&mut text)
        .with_context(|| format!("failed to read {}", name))?;
    Ok(text)
}

/// Reads a bundle back into a `Store`. Unlike slot loading this is strict: any
/// missing entry, checksum mismatch or malformed JSON fails the whole import.
pub fn import_bundle(in_path: &Path) -> anyhow::Result<Store> {
    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.to_string_lossy()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let manifest: serde_json::Value = serde_json::from_str(&read_entry(&mut archive, MANIFEST_ENTRY)?)
        .context("manifest.json is invalid JSON")?;
    let format = manifest
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if format != BUNDLE_FORMAT_V1 {
        return Err(anyhow!("unsupported bundle format: {}", format));
    }

    let students_json = read_entry(&mut archive, STUDENTS_ENTRY)?;
    let courses_json = read_entry(&mut archive, COURSES_ENTRY)?;
    for (entry, body) in [(STUDENTS_ENTRY, &students_json), (COURSES_ENTRY, &courses_json)] {
        let expected = manifest
            .get("checksums")
            .and_then(|c| c.get(entry))
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("manifest missing checksum for {}", entry))?;
        if expected != sha256_hex(body.as_bytes()) {
            return Err(anyhow!("checksum mismatch for {}", entry));
        }
    }

    let students: Vec<Student> =
        serde_json::from_str(&students_json).context("students entry is invalid")?;
    let courses: Vec<String> =
        serde_json::from_str(&courses_json).context("courses entry is invalid")?;
    Ok(Store { students, courses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[test]
    fn export_then_import_reproduces_store() {
        let dir = temp_dir("rollbook-backup-unit");
        let mut alice = Student::new(1, "Alice", 2);
        alice.attendance.total = 2;
        alice.attendance.present = 1;
        let store = Store {
            students: vec![alice],
            courses: vec!["Math".to_string()],
        };
        let out = dir.join("nested/bundle.zip");
        let summary = export_bundle(&store, &out).expect("export");
        assert_eq!(summary.bundle_format, BUNDLE_FORMAT_V1);
        assert_eq!(summary.entry_count, 3);
        assert_eq!(import_bundle(&out).expect("import"), store);
    }

    fn write_bundle(path: &Path, manifest: serde_json::Value, students: &str) {
        let mut zip = ZipWriter::new(File::create(path).expect("create"));
        let opts = FileOptions::default();
        zip.start_file(MANIFEST_ENTRY, opts).expect("manifest");
        zip.write_all(manifest.to_string().as_bytes()).expect("write");
        zip.start_file(STUDENTS_ENTRY, opts).expect("students");
        zip.write_all(students.as_bytes()).expect("write");
        zip.start_file(COURSES_ENTRY, opts).expect("courses");
        zip.write_all(b"[]").expect("write");
        zip.finish().expect("finish");
    }

    #[test]
    fn import_requires_a_checksum_for_every_slot_entry() {
        let dir = temp_dir("rollbook-backup-nosum");
        let students =
            r#"[{"roll":1,"name":"A","semester":1,"attendance":{"total":0,"present":0},"marks":[]}]"#;

        let bare = dir.join("bare.zip");
        write_bundle(&bare, json!({ "format": BUNDLE_FORMAT_V1 }), students);
        let e = import_bundle(&bare).expect_err("no checksums");
        assert!(format!("{e:#}").contains("missing checksum"));

        let partial = dir.join("partial.zip");
        write_bundle(
            &partial,
            json!({
                "format": BUNDLE_FORMAT_V1,
                "checksums": { (STUDENTS_ENTRY): sha256_hex(students.as_bytes()) }
            }),
            students,
        );
        let e = import_bundle(&partial).expect_err("courses checksum missing");
        assert!(format!("{e:#}").contains(COURSES_ENTRY));
    }

    #[test]
    fn import_rejects_tampered_entry() {
        let dir = temp_dir("rollbook-backup-tamper");
        let out = dir.join("bundle.zip");
        write_bundle(
            &out,
            json!({
                "format": BUNDLE_FORMAT_V1,
                "checksums": {
                    (STUDENTS_ENTRY): sha256_hex(b"[]"),
                    (COURSES_ENTRY): sha256_hex(b"[]"),
                }
            }),
            r#"[{"roll":1,"name":"A","semester":1,"attendance":{"total":0,"present":0},"marks":[]}]"#,
        );
        let e = import_bundle(&out).expect_err("tampered");
        assert!(format!("{e:#}").contains("checksum mismatch"));
    }

    #[test]
    fn import_rejects_non_zip_input() {
        let dir = temp_dir("rollbook-backup-bad");
        let p = dir.join("not-a-bundle.zip");
        std::fs::write(&p, b"plain text").expect("write");
        assert!(import_bundle(&p).is_err());
    }
}
