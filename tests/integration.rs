//! Integration tests exercising the full scan flow over a checked-in
//! fixture tree and throwaway temp directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use genmark::generated::trivia::GENERATED_MARKERS;
use genmark::scan::SkipReason;
use genmark::{CancellationToken, Evidence, FileStatus, ScanReport, SourceFile};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run(root: &Path) -> ScanReport {
    genmark::run(&[root.to_path_buf()], &[], &CancellationToken::new()).unwrap()
}

/// Status per root-relative path, with `/` separators.
fn by_rel(report: &ScanReport, root: &Path) -> BTreeMap<String, FileStatus> {
    report
        .files
        .iter()
        .map(|f| {
            let rel = f.path.strip_prefix(root).unwrap_or(&f.path);
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (rel, f.status.clone())
        })
        .collect()
}

fn marker(marker: &'static str) -> FileStatus {
    FileStatus::Generated {
        evidence: Evidence::Marker { marker },
    }
}

const BY_NAME: FileStatus = FileStatus::Generated {
    evidence: Evidence::FileName,
};

// ---------------------------------------------------------------------------
// Fixture tree: every rule, end to end
// ---------------------------------------------------------------------------

#[test]
fn fixture_tree_classification() {
    let root = fixture("mini-dotnet");
    let report = run(&root);
    let files = by_rel(&report, &root);

    assert_eq!(files["Properties/AssemblyInfo.cs"], BY_NAME);
    assert_eq!(files["obj/Debug/App.g.i.cs"], BY_NAME);
    assert_eq!(files["TemporaryGeneratedFile_5937a670"], BY_NAME);

    assert_eq!(files["Generated/Service.cs"], marker("// <auto-generated>"));
    assert_eq!(
        files["Gui/MainWindow.cs"],
        marker("// This file has been generated by the GUI designer. Do not modify.")
    );
    assert_eq!(files["web/api.ts"], marker("// <autogenerated>"));

    // marker after the first token
    assert_eq!(files["Program.cs"], FileStatus::Authored);
    // marker is the third single-line comment
    assert_eq!(files["Licensed.cs"], FileStatus::Authored);
    // not an exact match
    assert_eq!(files["NoSpace.cs"], FileStatus::Authored);
    // block comments never count
    assert_eq!(files["web/app.ts"], FileStatus::Authored);

    assert_eq!(
        files["README.md"],
        FileStatus::Skipped {
            reason: SkipReason::Unsupported
        }
    );
    assert!(
        !files.keys().any(|k| k.starts_with("node_modules/")),
        "dependency directories are never walked: {files:?}"
    );

    assert_eq!(report.summary.generated, 6);
    assert_eq!(report.summary.authored, 4);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.unknown, 0);
    assert_eq!(report.summary.failed, 0);
}

#[test]
fn text_output_lists_generated_files_only() {
    let root = fixture("mini-dotnet");
    let output = genmark::format::report(&run(&root), false);

    assert!(output.starts_with("# Scan: "), "{output}");
    assert!(output.contains("6 generated"), "{output}");
    assert!(output.contains("AssemblyInfo.cs [generated: file name]"));
    assert!(output.contains("Service.cs [generated: // <auto-generated>]"));
    assert!(!output.contains("Program.cs"), "{output}");
}

#[test]
fn json_report_shape() {
    let root = fixture("mini-dotnet");
    let report = run(&root);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["generated"], 6);
    let service = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["path"].as_str().unwrap().ends_with("Service.cs"))
        .unwrap();
    assert_eq!(service["status"], "generated");
    assert_eq!(service["evidence"]["kind"], "marker");
    assert_eq!(service["evidence"]["marker"], "// <auto-generated>");
}

#[test]
fn exclude_globs_filter_the_walk() {
    let root = fixture("mini-dotnet");
    let report = genmark::run(
        &[root.clone()],
        &["obj/**".to_string(), "*.ts".to_string()],
        &CancellationToken::new(),
    )
    .unwrap();
    let files = by_rel(&report, &root);

    assert!(!files.contains_key("obj/Debug/App.g.i.cs"));
    assert!(!files.contains_key("web/api.ts"));
    assert!(files.contains_key("Generated/Service.cs"));
}

#[test]
fn single_file_root() {
    let path = fixture("mini-dotnet").join("Generated/Service.cs");
    let report = genmark::run(&[path.clone()], &[], &CancellationToken::new()).unwrap();
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].path, path);
    assert!(report.files[0].status.is_generated());
}

#[test]
fn missing_root_fails_with_not_found() {
    let err = genmark::run(
        &[PathBuf::from("/definitely/not/a/real/dir")],
        &[],
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

// ---------------------------------------------------------------------------
// Cancellation: aborted files are unknown, never authored
// ---------------------------------------------------------------------------

#[test]
fn cancelled_scan_reports_unknown() {
    let root = fixture("mini-dotnet");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = genmark::run(&[root.clone()], &[], &cancel).unwrap();
    let files = by_rel(&report, &root);

    // name rules need no traversal
    assert_eq!(files["Properties/AssemblyInfo.cs"], BY_NAME);
    assert_eq!(files["Generated/Service.cs"], FileStatus::Unknown);
    assert_eq!(files["Program.cs"], FileStatus::Unknown);
    assert_eq!(report.summary.authored, 0);
    assert_eq!(report.summary.unknown, 7);
}

// ---------------------------------------------------------------------------
// Temp trees: languages, encodings, odd files
// ---------------------------------------------------------------------------

#[test]
fn markers_across_languages() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("gen.rs", "// <auto-generated>\nfn main() {}\n"),
        ("gen.go", "// <auto-generated>\npackage main\n"),
        ("Gen.java", "// <autogenerated>\nclass Gen {}\n"),
        ("gen.c", "// <auto-generated>\nint x;\n"),
        ("gen.cpp", "// <auto-generated>\nint x;\n"),
        ("gen.js", "// header\n// <auto-generated>\nconst x = 1;\n"),
        ("gen.tsx", "// <auto-generated>\nexport const X = 1;\n"),
        ("Gen.swift", "// <auto-generated>\nlet x = 1\n"),
        ("gen.zig", "// <auto-generated>\nconst x = 1;\n"),
    ];
    for (name, text) in cases {
        fs::write(dir.path().join(name), text).unwrap();
    }

    let report = run(dir.path());
    for file in &report.files {
        assert!(
            file.status.is_generated(),
            "{} should be generated: {:?}",
            file.path.display(),
            file.status
        );
    }
    assert_eq!(report.summary.generated, cases.len());
}

#[test]
fn empty_binary_and_bom_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Empty.cs"), "").unwrap();
    fs::write(dir.path().join("Blob.cs"), b"\x00\x01\x02\x03").unwrap();
    fs::write(
        dir.path().join("Bom.cs"),
        "\u{feff}// <auto-generated>\r\nclass Bom {}\r\n",
    )
    .unwrap();
    fs::write(dir.path().join("OnlyComments.cs"), "// <auto-generated>\n").unwrap();

    let report = run(dir.path());
    let files = by_rel(&report, dir.path());

    assert_eq!(
        files["Empty.cs"],
        FileStatus::Skipped {
            reason: SkipReason::Empty
        }
    );
    assert_eq!(
        files["Blob.cs"],
        FileStatus::Skipped {
            reason: SkipReason::Binary
        }
    );
    assert_eq!(files["Bom.cs"], marker("// <auto-generated>"));
    // no first token → nothing to attach trivia to
    assert_eq!(files["OnlyComments.cs"], FileStatus::Authored);
}

// ---------------------------------------------------------------------------
// Concurrency: independent inputs give the same answers on any thread
// ---------------------------------------------------------------------------

#[test]
fn concurrent_classification_matches_sequential() {
    let names = [
        "Foo.g.cs",
        "Foo.g.i.cs",
        "Foo.designer.cs",
        "Foo.generated.vb",
        "AssemblyInfo.cs",
        "AssemblyInfo",
        "Foo.cs",
        "",
        "foo.DESIGNER.CS",
        "TemporaryGeneratedFile_x",
    ];
    let sources: Vec<SourceFile> = GENERATED_MARKERS
        .iter()
        .map(|m| format!("{m}\nclass A {{}}\n"))
        .chain([
            "//<auto-generated>\nclass A {}\n".to_string(),
            "// a\n// b\n// <auto-generated>\nclass A {}\n".to_string(),
            "class A {}\n".to_string(),
        ])
        .map(|text| SourceFile::new("A.cs", text))
        .collect();

    let cancel = CancellationToken::new();
    let expected_names: Vec<bool> = names
        .iter()
        .map(|n| genmark::is_generated_by_path(n))
        .collect();
    let expected_sources: Vec<bool> = sources
        .iter()
        .map(|s| s.is_from_generated_code(&cancel).unwrap())
        .collect();
    assert_eq!(expected_sources, [true, true, true, false, false, false]);

    let (names, sources, cancel) = (&names, &sources, &cancel);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    let n: Vec<bool> = names
                        .iter()
                        .map(|n| genmark::is_generated_by_path(n))
                        .collect();
                    let s: Vec<bool> = sources
                        .iter()
                        .map(|s| s.is_from_generated_code(cancel).unwrap())
                        .collect();
                    (n, s)
                })
            })
            .collect();
        for handle in handles {
            let (n, s) = handle.join().unwrap();
            assert_eq!(n, expected_names);
            assert_eq!(s, expected_sources);
        }
    });
}

#[test]
fn repeated_scans_are_identical() {
    let root = fixture("mini-dotnet");
    let first = by_rel(&run(&root), &root);
    for _ in 0..4 {
        assert_eq!(by_rel(&run(&root), &root), first);
    }
}
