use std::collections::HashMap;

/// A primary record with its looked-up secondary, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined<'a, P, S> {
    pub primary: P,
    pub secondary: Option<&'a S>,
}

/// Indexes decoded documents by their id. Later duplicates win.
pub fn index_by_id<S>(records: Vec<(String, S)>) -> HashMap<String, S> {
    records.into_iter().collect()
}

/// Decorates each primary record with the secondary its foreign key names.
///
/// Primary records are never dropped and keep their order; a missing or
/// unmatched key yields `secondary: None`.
pub fn resolve_join<'a, P, S, F>(primary: Vec<P>, index: &'a HashMap<String, S>, key: F) -> Vec<Joined<'a, P, S>>
where
    F: Fn(&P) -> Option<&str>,
{
    primary
        .into_iter()
        .map(|record| {
            let secondary = key(&record).and_then(|k| index.get(k));
            Joined {
                primary: record,
                secondary,
            }
        })
        .collect()
}
