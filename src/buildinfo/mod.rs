//! Build info extraction from Go executables
//!
//! Go binaries built in module mode carry a build info blob that starts
//! with the 14-byte magic `\xff Go buildinf:`, followed by the pointer size,
//! a flags byte and padding up to a 32-byte header. Since Go 1.18 the
//! toolchain version and module info follow inline as two
//! uvarint-length-prefixed strings.

mod modinfo;

pub use modinfo::{parse_modinfo, ModInfo};

use crate::domain::BuildMetadata;
use crate::error::BuildInfoError;
use std::path::Path;
use tracing::debug;

/// Magic marking the start of the build info header
const BUILD_INFO_MAGIC: &[u8] = b"\xff Go buildinf:";

/// Size of the build info header
const BUILD_INFO_HEADER_SIZE: usize = 32;

/// Header flag: pointers are big-endian
const FLAG_ENDIAN_BIG: u8 = 0x1;

/// Header flag: strings are stored inline after the header
const FLAG_VERSION_INLINE: u8 = 0x2;

/// Executable format magics accepted before searching for build info
const EXECUTABLE_MAGICS: &[&[u8]] = &[
    b"\x7fELF",          // ELF
    b"\xfe\xed\xfa\xce", // Mach-O 32-bit big-endian
    b"\xfe\xed\xfa\xcf", // Mach-O 64-bit big-endian
    b"\xce\xfa\xed\xfe", // Mach-O 32-bit little-endian
    b"\xcf\xfa\xed\xfe", // Mach-O 64-bit little-endian
    b"\xca\xfe\xba\xbe", // Mach-O universal
    b"MZ",               // PE
    b"\x01\xdf",         // XCOFF 32-bit
    b"\x01\xf7",         // XCOFF 64-bit
    b"\x00asm",          // WebAssembly
];

/// Reads build metadata from a candidate file
pub trait MetadataExtractor: Send + Sync {
    /// Extract the module identity embedded in the file
    fn extract(&self, path: &Path) -> Result<BuildMetadata, BuildInfoError>;
}

/// Extractor for Go 1.18+ executables
#[derive(Debug, Default, Clone, Copy)]
pub struct GoBuildInfoReader;

impl GoBuildInfoReader {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }
}

impl MetadataExtractor for GoBuildInfoReader {
    fn extract(&self, path: &Path) -> Result<BuildMetadata, BuildInfoError> {
        let data = std::fs::read(path).map_err(BuildInfoError::io)?;
        let metadata = parse_build_info(&data)?;
        debug!(
            file = %path.display(),
            module = %metadata.module_path,
            version = %metadata.installed_version,
            go = %metadata.go_version,
            "read build info"
        );
        Ok(metadata)
    }
}

/// Decode build metadata from the raw bytes of an executable
pub fn parse_build_info(data: &[u8]) -> Result<BuildMetadata, BuildInfoError> {
    if !EXECUTABLE_MAGICS.iter().any(|magic| data.starts_with(magic)) {
        return Err(BuildInfoError::UnrecognizedFormat);
    }

    let header = find_header(data).ok_or(BuildInfoError::NotGoExecutable)?;
    let flags = header[15];
    if flags & FLAG_VERSION_INLINE == 0 {
        return Err(BuildInfoError::UnsupportedFormat);
    }

    let mut rest = &header[BUILD_INFO_HEADER_SIZE..];
    let go_version = read_string(&mut rest)?;
    let mod_info = read_string(&mut rest)?;

    if go_version.is_empty() {
        return Err(BuildInfoError::NotGoExecutable);
    }

    let info = parse_modinfo(&String::from_utf8_lossy(strip_sentinels(mod_info)));
    if info.module_path.is_empty() {
        return Err(BuildInfoError::NoModuleInfo);
    }

    Ok(BuildMetadata::new(info.module_path, info.module_version, info.package_path)
        .with_go_version(String::from_utf8_lossy(go_version)))
}

/// Locate a plausible build info header, returning the slice starting at it
fn find_header(data: &[u8]) -> Option<&[u8]> {
    let mut offset = 0;
    while let Some(pos) = find(&data[offset..], BUILD_INFO_MAGIC) {
        let start = offset + pos;
        let candidate = &data[start..];
        if candidate.len() >= BUILD_INFO_HEADER_SIZE {
            let ptr_size = candidate[14];
            let flags = candidate[15];
            // Other bytes matching the magic (e.g. string constants) rarely
            // carry a sane pointer size and flag combination.
            if matches!(ptr_size, 4 | 8) && flags & !(FLAG_ENDIAN_BIG | FLAG_VERSION_INLINE) == 0
            {
                return Some(candidate);
            }
        }
        offset = start + 1;
    }
    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Read one uvarint-length-prefixed string and advance the cursor
fn read_string<'a>(cursor: &mut &'a [u8]) -> Result<&'a [u8], BuildInfoError> {
    let (len, consumed) = read_uvarint(cursor)?;
    let body = &cursor[consumed..];
    let len = usize::try_from(len)
        .ok()
        .filter(|len| *len <= body.len())
        .ok_or_else(|| BuildInfoError::malformed("string length exceeds file size"))?;
    let (value, remaining) = body.split_at(len);
    *cursor = remaining;
    Ok(value)
}

/// Decode an unsigned LEB128 varint, returning the value and bytes consumed
fn read_uvarint(data: &[u8]) -> Result<(u64, usize), BuildInfoError> {
    let mut value: u64 = 0;
    for (i, byte) in data.iter().take(10).enumerate() {
        let low = u64::from(byte & 0x7f);
        if i == 9 && *byte > 1 {
            return Err(BuildInfoError::malformed("varint overflows 64 bits"));
        }
        value |= low << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(BuildInfoError::malformed("truncated varint"))
}

/// Module info is framed by 16-byte sentinels on each side
fn strip_sentinels(mod_info: &[u8]) -> &[u8] {
    let len = mod_info.len();
    if len >= 33 && mod_info[len - 17] == b'\n' {
        &mod_info[16..len - 16]
    } else {
        mod_info
    }
}
