//! Chunk reconstruction from plain file contents.
//!
//! Chunk boundaries are never serialized to disk; a loaded file is split
//! back into chunks at blank-line-delimited regions, one chunk per region.
//! Runs of blank lines collapse into a single boundary.

use crate::model::chunk::Chunk;
use crate::model::chunks::rebase_start_lines;

/// Split file contents into a chunk list. Always returns at least one
/// chunk; an empty or all-blank file becomes a single empty chunk.
pub fn chunks_from_source(source: &str) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut region: Vec<&str> = Vec::new();

    for line in source.split('\n') {
        if line.trim().is_empty() {
            if !region.is_empty() {
                chunks.push(Chunk::new(region.join("\n")));
                region.clear();
            }
        } else {
            region.push(line);
        }
    }
    if !region.is_empty() {
        chunks.push(Chunk::new(region.join("\n")));
    }

    if chunks.is_empty() {
        chunks.push(Chunk::empty());
    }
    rebase_start_lines(&mut chunks, 0);
    chunks
}
