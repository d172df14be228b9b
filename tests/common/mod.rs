//! Shared fixtures: minimal executables carrying Go build info

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const MAGIC: &[u8] = b"\xff Go buildinf:";
const SENTINEL_START: &[u8] = b"0w\xaf\x0c\x92t\x08\x02A\xe1\xc1\x07\xe6\xd6\x18\xe6";
const SENTINEL_END: &[u8] = b"\xf92C1\x86\x18 r\x00\x82B\x10A\x16\xd8\xf2";

fn put_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Bytes of an ELF-prefixed file with Go 1.18+ inline build info
pub fn go_binary(module: &str, version: &str, package: &str) -> Vec<u8> {
    let mut mod_info = SENTINEL_START.to_vec();
    mod_info.extend_from_slice(
        format!("path\t{}\nmod\t{}\t{}\th1:abc=\n", package, module, version).as_bytes(),
    );
    mod_info.extend_from_slice(SENTINEL_END);

    let mut data = b"\x7fELF\x02\x01\x01\x00".to_vec();
    data.resize(128, 0);
    data.extend_from_slice(MAGIC);
    data.push(8);
    data.push(0x2);
    data.resize(128 + 32, 0);
    put_uvarint(&mut data, 8);
    data.extend_from_slice(b"go1.22.1");
    put_uvarint(&mut data, mod_info.len() as u64);
    data.extend_from_slice(&mod_info);
    data.resize(data.len() + 64, 0);
    data
}

/// Write a Go binary fixture into `dir`, returning its path
pub fn write_go_binary(dir: &Path, name: &str, module: &str, version: &str, package: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, go_binary(module, version, package)).expect("Failed to write fixture");
    path
}

/// Proxy `@v/list` path for a lowercase module
pub fn list_path(module: &str) -> String {
    format!("/{}/@v/list", module)
}
