//! Minimal ustar writer on top of [`tar::Builder`].
//!
//! Only regular files are written. Every header field is ASCII: octal numbers
//! are zero padded and NUL terminated, and the checksum is computed over the
//! header with its own field filled with spaces and stored as six octal
//! digits, a NUL and a space.
//!
//! Member names longer than [`NAME_LEN`] bytes are rejected rather than
//! truncated, since a truncated name would point pacman at the wrong package
//! directory.

use tar::{Builder, EntryType, Header};

use crate::{
    error::{ErrorContext, RepoError},
    RepoResult,
};

pub const BLOCK_SIZE: usize = 512;
pub const NAME_LEN: usize = 100;

const MODE: u32 = 0o644;
const CHECKSUM_OFFSET: usize = 148;
const CHECKSUM_LEN: usize = 8;

/// Largest value an 11-digit octal field can hold. `tar` would switch to the
/// GNU binary encoding above it.
const MAX_OCTAL_11: u64 = 0o777_7777_7777;

/// A named byte blob destined for the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub content: Vec<u8>,
    /// Modification time in epoch seconds; the build time is used when unset.
    pub mtime: Option<u64>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mtime: None,
        }
    }

    pub fn with_mtime(mut self, mtime: u64) -> Self {
        self.mtime = Some(mtime);
        self
    }
}

/// Packs `entries` in order, closing the archive with two zero blocks.
///
/// `now` is the modification time written for entries without one.
pub fn build(entries: &[ArchiveEntry], now: u64) -> RepoResult<Vec<u8>> {
    let capacity = entries
        .iter()
        .map(|e| BLOCK_SIZE + e.content.len() + padding(e.content.len()))
        .sum::<usize>()
        + 2 * BLOCK_SIZE;
    let mut builder = Builder::new(Vec::with_capacity(capacity));

    for entry in entries {
        let header = header(entry, entry.mtime.unwrap_or(now))?;
        builder
            .append(&header, entry.content.as_slice())
            .with_context(|| format!("appending {} to archive", entry.path))?;
    }

    builder
        .into_inner()
        .with_context(|| "finishing archive".to_string())
}

/// Encodes the 512-byte header for `entry`.
pub fn header(entry: &ArchiveEntry, mtime: u64) -> RepoResult<Header> {
    let name = entry.path.as_bytes();
    if name.len() > NAME_LEN {
        return Err(RepoError::NameTooLong {
            name: entry.path.clone(),
            len: name.len(),
            max: NAME_LEN,
        });
    }
    let size = entry.content.len() as u64;
    check_octal_11("size", size)?;
    check_octal_11("mtime", mtime)?;

    let mut header = Header::new_ustar();
    header.as_old_mut().name[..name.len()].copy_from_slice(name);
    header.set_mode(MODE);
    header.set_uid(0);
    header.set_gid(0);
    header.set_size(size);
    header.set_mtime(mtime);
    header.set_entry_type(EntryType::Regular);

    // `set_cksum` writes seven digits and a NUL; the field here holds six
    // digits, a NUL and a space.
    let sum = checksum(header.as_bytes());
    header
        .as_old_mut()
        .cksum
        .copy_from_slice(format!("{sum:06o}\0 ").as_bytes());

    Ok(header)
}

/// Unsigned sum of the header bytes with the checksum field read as spaces.
pub fn checksum(block: &[u8; BLOCK_SIZE]) -> u32 {
    block
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if (CHECKSUM_OFFSET..CHECKSUM_OFFSET + CHECKSUM_LEN).contains(&i) {
                u32::from(b' ')
            } else {
                u32::from(b)
            }
        })
        .sum()
}

/// Number of zero bytes needed after `len` content bytes.
pub fn padding(len: usize) -> usize {
    (BLOCK_SIZE - len % BLOCK_SIZE) % BLOCK_SIZE
}

fn check_octal_11(field: &'static str, value: u64) -> RepoResult<()> {
    if value > MAX_OCTAL_11 {
        return Err(RepoError::FieldOverflow { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn parse_octal(field: &[u8]) -> u64 {
        let text = std::str::from_utf8(field).unwrap();
        let digits = text.trim_matches(|c: char| c == '\0' || c == ' ');
        u64::from_str_radix(digits, 8).unwrap()
    }

    #[test]
    fn test_padding() {
        assert_eq!(padding(0), 0);
        assert_eq!(padding(1), 511);
        assert_eq!(padding(511), 1);
        assert_eq!(padding(512), 0);
        assert_eq!(padding(513), 511);
        assert_eq!(padding(1024), 0);
    }

    #[test]
    fn test_entry_and_total_lengths_are_block_aligned() {
        for len in [0usize, 1, 100, 511, 512, 513, 1000, 1024, 1536, 4097] {
            let entry = ArchiveEntry::new("pkg/desc", vec![b'a'; len]);
            let out = build(std::slice::from_ref(&entry), NOW).unwrap();

            let entry_len = out.len() - 2 * BLOCK_SIZE;
            assert_eq!(entry_len % BLOCK_SIZE, 0, "content length {len}");
            assert_eq!(entry_len, BLOCK_SIZE + len.div_ceil(BLOCK_SIZE) * BLOCK_SIZE);
            assert_eq!(out.len() % BLOCK_SIZE, 0);
        }
    }

    #[test]
    fn test_empty_archive_is_two_zero_blocks() {
        let out = build(&[], NOW).unwrap();
        assert_eq!(out, vec![0u8; 1024]);
    }

    #[test]
    fn test_header_fields() {
        let entry = ArchiveEntry::new("linux-upstream-6.6.1-x86_64/desc", b"hello".to_vec());
        let header = header(&entry, NOW).unwrap();
        let h = header.as_bytes();

        assert_eq!(&h[..32], b"linux-upstream-6.6.1-x86_64/desc");
        assert!(h[32..100].iter().all(|&b| b == 0));
        assert_eq!(&h[100..108], b"0000644\0");
        assert_eq!(&h[108..116], b"0000000\0");
        assert_eq!(&h[116..124], b"0000000\0");
        assert_eq!(&h[124..136], b"00000000005\0");
        assert_eq!(parse_octal(&h[136..148]), NOW);
        assert_eq!(h[147], 0);
        assert_eq!(h[156], b'0');
        assert_eq!(&h[257..263], b"ustar\0");
        assert_eq!(&h[263..265], b"00");
        assert_eq!(h[154], 0);
        assert_eq!(h[155], b' ');
    }

    #[test]
    fn test_checksum_matches_recomputed_sum() {
        let entries = [
            ArchiveEntry::new("a/desc", b"one".to_vec()),
            ArchiveEntry::new("b/files", vec![7u8; 700]),
        ];
        let out = build(&entries, NOW).unwrap();

        for offset in [0, 1024] {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(&out[offset..offset + BLOCK_SIZE]);

            let stored = parse_octal(&block[148..156]);
            let mut blank = block;
            blank[148..156].fill(b' ');
            let recomputed: u64 = blank.iter().map(|&b| u64::from(b)).sum();

            assert_eq!(stored, recomputed);
            assert_eq!(u64::from(checksum(&block)), stored);
        }
    }

    #[test]
    fn test_content_follows_header() {
        let entry = ArchiveEntry::new("x/depends", b"%DEPENDS%\nlinux-firmware\n".to_vec());
        let out = build(std::slice::from_ref(&entry), NOW).unwrap();

        assert_eq!(&out[512..512 + entry.content.len()], entry.content.as_slice());
        assert!(out[512 + entry.content.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_name_too_long_is_rejected() {
        let ok = ArchiveEntry::new("n".repeat(100), Vec::new());
        assert!(header(&ok, NOW).is_ok());

        let long = ArchiveEntry::new("n".repeat(101), Vec::new());
        assert!(matches!(
            build(&[long], NOW),
            Err(RepoError::NameTooLong { len: 101, max: 100, .. })
        ));
    }

    #[test]
    fn test_mtime_overflow_is_rejected() {
        let entry = ArchiveEntry::new("a/desc", Vec::new()).with_mtime(MAX_OCTAL_11 + 1);
        assert!(matches!(
            build(&[entry], NOW),
            Err(RepoError::FieldOverflow { field: "mtime", .. })
        ));
    }

    #[test]
    fn test_entry_mtime_overrides_build_time() {
        let entry = ArchiveEntry::new("a/desc", Vec::new()).with_mtime(1_704_067_200);
        let out = build(&[entry], NOW).unwrap();
        assert_eq!(parse_octal(&out[136..148]), 1_704_067_200);
    }

    #[test]
    fn test_round_trip_with_tar_reader() {
        let entries = vec![
            ArchiveEntry::new("linux-upstream-6.6.1_liquid-2-x86_64/desc", b"%NAME%\nx\n\n".to_vec()),
            ArchiveEntry::new("linux-upstream-6.6.1_liquid-2-x86_64/depends", Vec::new()),
            ArchiveEntry::new("linux-upstream-zen-6.6.1_liquid-2-x86_64/files", vec![b'f'; 1500]),
        ];
        let out = build(&entries, NOW).unwrap();

        let mut archive = tar::Archive::new(out.as_slice());
        let mut seen = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let header = entry.header();
            assert!(header.as_ustar().is_some());
            assert_eq!(header.mode().unwrap(), 0o644);
            assert_eq!(header.mtime().unwrap(), NOW);
            assert_eq!(header.cksum().unwrap(), checksum(header.as_bytes()));

            let path = entry.path().unwrap().to_string_lossy().into_owned();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            seen.push((path, content));
        }

        let expected: Vec<_> = entries
            .into_iter()
            .map(|e| (e.path, e.content))
            .collect();
        assert_eq!(seen, expected);
    }
}
