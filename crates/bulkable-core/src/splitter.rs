use crate::error::{BulkError, BulkResult};

/// Split `items` into consecutive chunks of at most `batch_size` items.
///
/// `None` yields a single chunk holding everything. Empty input yields no
/// chunks. Concatenating the chunks gives back `items` in order.
pub fn split<T>(items: &[T], batch_size: Option<usize>) -> BulkResult<Vec<&[T]>> {
    let size = match batch_size {
        Some(0) => return Err(BulkError::InvalidBatchSize(0)),
        Some(n) => n,
        None => items.len(),
    };
    if items.is_empty() {
        return Ok(Vec::new());
    }
    Ok(items.chunks(size).collect())
}
