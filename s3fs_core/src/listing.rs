//! ListObjectsV2 emulation for stores that hold their keys in-process.

use crate::store::{ListObjectsRequest, ListPage, ObjectMeta};

/// Page size S3 uses when the caller does not ask for one.
pub const DEFAULT_MAX_KEYS: usize = 1000;

/// Builds one listing page out of `objects`, which must be sorted by key.
///
/// Keys outside `request.prefix` are ignored. With a delimiter, every key
/// whose remainder (after the prefix) contains the delimiter is folded into
/// a common prefix ending at the first delimiter occurrence; each common
/// prefix is reported once. Objects and common prefixes share the
/// `max_keys` budget. The page token is the last reported key or prefix, so
/// the next page starts strictly after it.
pub fn list_page<I>(objects: I, request: &ListObjectsRequest, max_keys: usize) -> ListPage
where
    I: IntoIterator<Item = ObjectMeta>,
{
    let max_keys = max_keys.max(1);
    let prefix = request.prefix.as_str();
    let token = request.page_token.as_deref();
    let delimiter = request.delimiter.as_deref().filter(|d| !d.is_empty());

    let mut page = ListPage::default();
    let mut reported = 0usize;
    let mut last: Option<String> = None;

    for object in objects {
        if !object.key.starts_with(prefix) {
            continue;
        }
        if token.is_some_and(|t| object.key.as_str() <= t) {
            continue;
        }

        let common_prefix = delimiter.and_then(|d| {
            object.key[prefix.len()..]
                .find(d)
                .map(|idx| object.key[..prefix.len() + idx + d.len()].to_owned())
        });
        if let Some(cp) = &common_prefix {
            if token == Some(cp.as_str()) || last.as_deref() == Some(cp.as_str()) {
                continue;
            }
        }

        if reported == max_keys {
            page.next_page_token = last;
            return page;
        }
        reported += 1;

        match common_prefix {
            Some(cp) => {
                last = Some(cp.clone());
                page.common_prefixes.push(cp);
            }
            None => {
                last = Some(object.key.clone());
                page.objects.push(object);
            }
        }
    }

    page
}
