//! Integration tests: the full extract -> scaffold -> write pipeline against
//! real and in-memory filesystems.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use scribe_adapters::{BuiltinCatalog, LocalFilesystem, MemoryFilesystem, ReplayProvider};
use scribe_core::{
    application::ApplicationError,
    domain::DomainError,
    error::ScribeError,
    prelude::*,
};

fn local_service() -> GenerationService {
    GenerationService::new(Arc::new(BuiltinCatalog::new()), Box::new(LocalFilesystem::new()))
}

// ============================================================================
// Materializer policies
// ============================================================================

#[test]
fn fail_if_exists_raises_collision_and_keeps_content() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.txt"), "original").unwrap();

    let fs_port = LocalFilesystem::new();
    let files: ExtractedFileSet = [("a.txt", "replacement")].into_iter().collect();
    let err = TreeMaterializer::new(&fs_port)
        .materialize_files(&files, tmp.path(), WritePolicy::FailIfExists)
        .unwrap_err();

    assert!(matches!(
        err,
        ScribeError::Application(ApplicationError::WriteCollision { .. })
    ));
    assert_eq!(
        fs::read_to_string(tmp.path().join("a.txt")).unwrap(),
        "original"
    );
}

#[test]
fn fail_if_exists_keeps_earlier_writes_from_the_same_call() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("b.txt"), "old").unwrap();

    let fs_port = LocalFilesystem::new();
    let files: ExtractedFileSet = [("a.txt", "1"), ("b.txt", "2")].into_iter().collect();
    let result = TreeMaterializer::new(&fs_port).materialize_files(
        &files,
        tmp.path(),
        WritePolicy::FailIfExists,
    );

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(tmp.path().join("a.txt")).unwrap(), "1");
    assert_eq!(fs::read_to_string(tmp.path().join("b.txt")).unwrap(), "old");
}

#[test]
fn skip_existing_never_reports_or_modifies_existing_files() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("keep.txt"), "mine").unwrap();

    let fs_port = LocalFilesystem::new();
    let files: ExtractedFileSet = [("keep.txt", "theirs"), ("new/fresh.txt", "hello")]
        .into_iter()
        .collect();
    let written = TreeMaterializer::new(&fs_port)
        .materialize_files(&files, tmp.path(), WritePolicy::SkipExisting)
        .unwrap();

    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with("new/fresh.txt"));
    assert!(written.iter().all(|p| !p.ends_with("keep.txt")));
    assert_eq!(
        fs::read_to_string(tmp.path().join("keep.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn overwrite_replaces_existing_files() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("x.py"), "old").unwrap();

    let fs_port = LocalFilesystem::new();
    let files: ExtractedFileSet = [("x.py", "new")].into_iter().collect();
    let written = TreeMaterializer::new(&fs_port)
        .materialize_files(&files, tmp.path(), WritePolicy::Overwrite)
        .unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(fs::read_to_string(tmp.path().join("x.py")).unwrap(), "new");
}

#[test]
fn root_is_created_when_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("deep/nested/out");

    let fs_port = LocalFilesystem::new();
    let written = TreeMaterializer::new(&fs_port)
        .materialize_files(&ExtractedFileSet::new(), &root, WritePolicy::Overwrite)
        .unwrap();

    assert!(written.is_empty());
    assert!(root.is_dir());
}

#[test]
fn written_paths_are_absolute() {
    let tmp = tempfile::tempdir().unwrap();
    let fs_port = LocalFilesystem::new();
    let files: ExtractedFileSet = [("a/b.txt", "x")].into_iter().collect();

    let written = TreeMaterializer::new(&fs_port)
        .materialize_files(&files, tmp.path(), WritePolicy::Overwrite)
        .unwrap();

    assert!(written[0].is_absolute());
}

// ============================================================================
// Round trip and safety
// ============================================================================

#[test]
fn extract_then_materialize_round_trips_byte_for_byte() {
    let text = "Intro\n```python\nsrc/app.py:\nimport sys\n\n\tprint(sys.argv)  \n```\n\
                ```\nREADME.md:\n# Title\n\nunicode: héllo ✓\n```\n```\nprint('bare')\n```";
    let files = extract(text);
    assert_eq!(files.len(), 3);

    let tmp = tempfile::tempdir().unwrap();
    let fs_port = LocalFilesystem::new();
    TreeMaterializer::new(&fs_port)
        .materialize_files(&files, tmp.path(), WritePolicy::Overwrite)
        .unwrap();

    for (path, content) in files.iter() {
        let on_disk = fs::read(tmp.path().join(path)).unwrap();
        assert_eq!(on_disk, content.as_bytes(), "{path}");
    }
}

#[test]
fn traversal_is_rejected_and_nothing_escapes_the_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("a/b/out");
    let text = "```\n../../etc/passwd:\nroot:x:0:0\n```";

    let fs_port = LocalFilesystem::new();
    let err = TreeMaterializer::new(&fs_port)
        .materialize_files(&extract(text), &root, WritePolicy::Overwrite)
        .unwrap_err();

    assert!(matches!(
        err,
        ScribeError::Domain(DomainError::PathSafetyViolation { .. })
    ));
    assert!(!tmp.path().join("a/etc").exists());
    assert!(!tmp.path().join("a/etc/passwd").exists());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn absolute_path_injection_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("injected.txt");
    let text = format!("```\n{}:\npwned\n```", target.display());

    let manifest = local_service().generate(
        &text,
        &tmp.path().join("out"),
        None,
        &GenerationContext::new(),
    );

    assert!(!manifest.success);
    assert!(!target.exists());
}

// ============================================================================
// Orchestrator
// ============================================================================

#[test]
fn end_to_end_two_blocks_without_scaffold() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = "```\nmodels.py:\nclass Task: pass\n```\n\n```\nprint('ok')\n```";

    let manifest = local_service().generate(raw, tmp.path(), None, &GenerationContext::new());

    assert!(manifest.success);
    assert_eq!(manifest.file_count, 2);
    assert_eq!(manifest.written_paths.len(), 2);
    assert_eq!(manifest.raw_response, raw);
    assert_eq!(
        fs::read_to_string(tmp.path().join("models.py")).unwrap(),
        "class Task: pass"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("file_2.py")).unwrap(),
        "print('ok')"
    );
    assert!(manifest.preview_path().unwrap().ends_with("models.py"));
}

#[test]
fn generated_files_win_over_scaffold_files() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = "```\nsrc/main.py:\nprint('generated')\n```";

    let manifest = local_service().generate(
        raw,
        tmp.path(),
        Some(ScaffoldName::Python),
        &GenerationContext::new(),
    );

    assert!(manifest.success);
    // Only the generated pass is reported.
    assert_eq!(manifest.file_count, 1);
    assert_eq!(
        fs::read_to_string(tmp.path().join("src/main.py")).unwrap(),
        "print('generated')"
    );
    // Scaffold-only files are still on disk.
    assert!(tmp.path().join("requirements.txt").is_file());
    assert!(tmp.path().join("src/__init__.py").is_file());
}

#[test]
fn scaffold_pass_never_clobbers_existing_files() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("README.md"), "hand written").unwrap();

    local_service().generate("", tmp.path(), Some(ScaffoldName::Python), &GenerationContext::new());

    assert_eq!(
        fs::read_to_string(tmp.path().join("README.md")).unwrap(),
        "hand written"
    );
}

#[test]
fn scaffold_placeholders_are_rendered_from_context() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = GenerationContext::for_project("Task Board");

    local_service().generate("", tmp.path(), Some(ScaffoldName::Flask), &ctx);

    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# Task Board"));
    assert!(tmp.path().join("templates").is_dir());
}

#[test]
fn unknown_scaffold_name_degrades_to_no_scaffold() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = local_service().generate(
        "```\na.py:\n1\n```",
        tmp.path(),
        Some(ScaffoldName::resolve("cobol")),
        &GenerationContext::new(),
    );

    assert!(manifest.success);
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn failed_write_pass_leaves_scaffold_files_but_reports_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = "```\n../escape.py:\nx\n```";

    let manifest = local_service().generate(
        raw,
        tmp.path(),
        Some(ScaffoldName::Web),
        &GenerationContext::new(),
    );

    assert!(!manifest.success);
    assert!(manifest.written_paths.is_empty());
    assert!(manifest.error_message.is_some());
    assert!(tmp.path().join("index.html").is_file());
}

#[test]
fn empty_response_is_a_successful_empty_run() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = local_service().generate(
        "Sorry, I cannot help with that.",
        tmp.path(),
        None,
        &GenerationContext::new(),
    );

    assert!(manifest.success);
    assert_eq!(manifest.file_count, 0);
    assert!(manifest.preview_path().is_none());
}

#[test]
fn prompt_driven_run_with_replay_provider() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = ReplayProvider::from_text("```python\nmain.py:\nprint('hi')\n```");
    let request = PromptRequest::new("say hi", tmp.path())
        .with_scaffold(Some(ScaffoldName::Python));

    let manifest = local_service().generate_from_prompt(&provider, &request);

    assert!(manifest.success);
    assert_eq!(manifest.file_count, 1);
    assert_eq!(
        fs::read_to_string(tmp.path().join("main.py")).unwrap(),
        "print('hi')"
    );
}

#[test]
fn provider_failure_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("never");
    let provider = ReplayProvider::from_file(tmp.path().join("missing.md"));

    let manifest =
        local_service().generate_from_prompt(&provider, &PromptRequest::new("x", &root));

    assert!(!manifest.success);
    assert!(manifest.raw_response.is_empty());
    assert!(!root.exists());
}

#[test]
fn fresh_dirs_keep_runs_apart() {
    let tmp = tempfile::tempdir().unwrap();
    let service = local_service();
    let raw = "```\nsame.py:\nx\n```";

    let a = fresh_project_dir(tmp.path());
    let b = fresh_project_dir(tmp.path());
    assert!(service.generate(raw, &a, None, &GenerationContext::new()).success);
    assert!(service.generate(raw, &b, None, &GenerationContext::new()).success);

    assert!(a.join("same.py").is_file());
    assert!(b.join("same.py").is_file());
}

// ============================================================================
// In-memory filesystem
// ============================================================================

#[test]
fn memory_filesystem_runs_the_same_pipeline() {
    let memfs = MemoryFilesystem::new();
    let service = GenerationService::new(Arc::new(BuiltinCatalog::new()), Box::new(memfs.clone()));

    let manifest = service.generate(
        "```\nmodels.py:\nclass Task: pass\n```\n```\nprint('ok')\n```",
        Path::new("run"),
        Some(ScaffoldName::Web),
        &GenerationContext::new(),
    );

    assert!(manifest.success);
    assert_eq!(
        memfs.file(Path::new("/memfs/run/models.py")).as_deref(),
        Some("class Task: pass")
    );
    assert!(memfs.file(Path::new("/memfs/run/index.html")).is_some());
    assert_eq!(memfs.list_files().len(), 5);
}

#[test]
fn memory_filesystem_honours_collisions() {
    let memfs = MemoryFilesystem::new();
    memfs.insert_file("/memfs/out/a.txt", "seeded");

    let files: ExtractedFileSet = [("a.txt", "new")].into_iter().collect();
    let result = TreeMaterializer::new(&memfs).materialize_files(
        &files,
        Path::new("out"),
        WritePolicy::FailIfExists,
    );

    assert!(result.is_err());
    assert_eq!(
        memfs.read_file(Path::new("/memfs/out/a.txt")).unwrap(),
        "seeded"
    );
}
