use std::path::Path;

use anyhow::Result;
use catalog_paginate::Item;

/// Load catalogue items from CSV (columns: identifier, title, href)
///
/// The first row is a header. The href column is optional; an empty value
/// means the item page carries no link.
pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<Item>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    let items = tokio::task::spawn_blocking(move || {
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        let mut items = Vec::new();

        for result in reader.records() {
            let record = result?;
            if record.len() >= 2 {
                let href = record
                    .get(2)
                    .map(str::trim)
                    .filter(|href| !href.is_empty())
                    .map(str::to_string);
                items.push(Item {
                    identifier: record[0].to_string(),
                    display_title: record[1].to_string(),
                    href,
                });
            }
        }
        Ok::<_, csv::Error>(items)
    })
    .await??;

    Ok(items)
}
