use std::collections::HashSet;

/// Fills blank header names and suffixes repeated ones (`a`, `a.1`, `a.2`).
pub(crate) fn normalize_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let named = raw
        .into_iter()
        .enumerate()
        .map(|(position, name)| {
            let name = name.as_ref();
            if name.trim().is_empty() {
                format!("Unnamed: {position}")
            } else {
                name.to_string()
            }
        })
        .collect::<Vec<_>>();

    let mut taken = named.iter().cloned().collect::<HashSet<_>>();
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(named.len());

    for name in named {
        if seen.insert(name.clone()) {
            headers.push(name);
            continue;
        }

        let mut suffix = 1_usize;
        let renamed = loop {
            let candidate = format!("{name}.{suffix}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        taken.insert(renamed.clone());
        seen.insert(renamed.clone());
        headers.push(renamed);
    }

    headers
}
