//! Template archive fixtures
//!
//! Archives are built in memory the way source hosts lay them out: a
//! `pax_global_header` entry followed by everything wrapped in one
//! top-level `<repo>-<branch>/` directory.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::path::{Path, PathBuf};
use tar::{Builder, EntryType, Header};

/// Wrapper directory used by the standard fixture
pub const WRAPPER_DIR: &str = "puro-skeleton-master";

/// Files in the standard fixture (path relative to the wrapper, contents)
pub const SKELETON_FILES: &[(&str, &str)] = &[
    ("package.json", "{\n  \"name\": \"puro-skeleton\"\n}\n"),
    ("README.md", "# Puro skeleton\n"),
    ("src/index.ts", "export const app = 'puro';\n"),
    ("src/controllers/HelloController.ts", "export class HelloController {}\n"),
];

const PAX_COMMENT: &[u8] = b"52 comment=0123456789abcdef0123456789abcdef01234567\n";

/// Build a `.tar.gz` with every file wrapped in `wrapper/`
pub fn template_archive(wrapper: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    let mut pax = Header::new_ustar();
    pax.set_entry_type(EntryType::XGlobalHeader);
    pax.set_size(PAX_COMMENT.len() as u64);
    pax.set_mode(0o644);
    builder
        .append_data(&mut pax, "pax_global_header", PAX_COMMENT)
        .unwrap();

    let mut dir = Header::new_gnu();
    dir.set_entry_type(EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    builder
        .append_data(&mut dir, format!("{}/", wrapper), std::io::empty())
        .unwrap();

    for (path, contents) in files {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, format!("{}/{}", wrapper, path), contents.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// The standard skeleton fixture
pub fn skeleton_archive() -> Vec<u8> {
    template_archive(WRAPPER_DIR, SKELETON_FILES)
}

/// A `.tar.gz` whose single entry climbs out of the target with `..`
///
/// The name is written into the raw header because the builder refuses
/// such paths.
pub fn escaping_archive() -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    let contents = b"escaped\n";
    let name = b"wrapper/../../escape.txt";

    let mut header = Header::new_gnu();
    header.as_old_mut().name[..name.len()].copy_from_slice(name);
    header.set_entry_type(EntryType::Regular);
    header.set_size(contents.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append(&header, &contents[..]).unwrap();

    builder.into_inner().unwrap().finish().unwrap()
}

/// One entry of a hand-ordered fixture archive
pub enum FixtureEntry<'a> {
    /// Regular file (path, contents)
    File(&'a str, &'a str),
    /// Symbolic link (path, link target)
    Symlink(&'a str, &'a str),
    /// Hard link (path, archive path of the linked entry)
    HardLink(&'a str, &'a str),
}

/// Build a `.tar.gz` with `entries` in order under `wrapper/`
///
/// Link targets are stored verbatim, so they can be absolute or climb out
/// with `..`.
pub fn linked_archive(wrapper: &str, entries: &[FixtureEntry]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    for entry in entries {
        let mut header = Header::new_gnu();
        header.set_mode(0o644);

        match entry {
            FixtureEntry::File(path, contents) => {
                header.set_entry_type(EntryType::Regular);
                header.set_size(contents.len() as u64);
                builder
                    .append_data(&mut header, format!("{}/{}", wrapper, path), contents.as_bytes())
                    .unwrap();
            }
            FixtureEntry::Symlink(path, link) | FixtureEntry::HardLink(path, link) => {
                let kind = match entry {
                    FixtureEntry::Symlink(..) => EntryType::Symlink,
                    _ => EntryType::Link,
                };
                header.set_entry_type(kind);
                header.set_size(0);
                header.set_link_name(link).unwrap();
                builder
                    .append_data(&mut header, format!("{}/{}", wrapper, path), std::io::empty())
                    .unwrap();
            }
        }
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// Assert that every skeleton file landed directly in `target`
pub fn assert_skeleton_extracted(target: &Path) {
    for (path, contents) in SKELETON_FILES {
        let extracted = target.join(path);
        let actual = fs::read_to_string(&extracted)
            .unwrap_or_else(|e| panic!("missing {}: {}", extracted.display(), e));
        assert_eq!(&actual, contents, "contents of {}", path);
    }
    assert!(
        !target.join(WRAPPER_DIR).exists(),
        "wrapper directory should be stripped"
    );
    assert!(!target.join("pax_global_header").exists());
}

/// Write an executable shell script that behaves like a package manager
///
/// It prints two stdout lines and one stderr line, then exits with
/// `exit_code`.
#[cfg(unix)]
pub fn fake_package_manager(dir: &Path, exit_code: i32) -> PathBuf {
    let body = format!(
        "echo \"installing in $PWD\"\necho \"args: $*\"\necho \"warn: deprecated dependency\" >&2\nexit {}\n",
        exit_code
    );
    scripted_package_manager(dir, &body)
}

/// Write an executable `sh` script running `body`
#[cfg(unix)]
pub fn scripted_package_manager(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-pm");
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();

    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();

    path
}
