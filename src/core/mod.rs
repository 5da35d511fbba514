// ─── modsort core ───
// Backend for sorting Minecraft mods by the side they run on.
//
// Architecture:
//   core/
//     hash      — streaming SHA-1 / SHA-512 file digests
//     http      — shared HTTP client with the mandatory agent header
//     registry  — Modrinth v2 lookups by file hash and by project id
//     sorter    — side classification + the sequential sorting pipeline

pub mod error;
pub mod hash;
pub mod http;
pub mod registry;
pub mod sorter;
