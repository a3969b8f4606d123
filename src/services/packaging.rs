// SPDX-License-Identifier: MIT

//! Packaging: turn a generation artifact into a downloadable ZIP.
//!
//! Layout follows a standard Flutter project: `pubspec.yaml` at the root,
//! `lib/main.dart`, pages under `lib/pages/`, widgets under
//! `lib/widgets/`, and one empty placeholder per listed asset filename.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::AppError;
use crate::models::FlutterBundle;

/// Build a ZIP archive from a generated bundle.
pub fn bundle_to_zip(bundle: &FlutterBundle) -> Result<Vec<u8>, AppError> {
    let buffer = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(buffer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(6));

    write_entry(&mut writer, "pubspec.yaml", &bundle.pubspec_yaml, options)?;
    write_entry(&mut writer, "lib/main.dart", &bundle.main_dart, options)?;

    for (name, source) in &bundle.pages {
        let path = format!("lib/pages/{}", with_dart_ext(name));
        write_entry(&mut writer, &path, source, options)?;
    }

    for (name, source) in &bundle.widgets {
        let path = format!("lib/widgets/{}", with_dart_ext(name));
        write_entry(&mut writer, &path, source, options)?;
    }

    // The generator only names assets; placeholders mark where real files
    // belong in the tree.
    for asset in &bundle.assets {
        write_entry(&mut writer, &format!("assets/{}", asset), "", options)?;
    }

    let finished = writer
        .finish()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to finalize ZIP: {}", e)))?;
    Ok(finished.into_inner())
}

fn write_entry(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    path: &str,
    contents: &str,
    options: SimpleFileOptions,
) -> Result<(), AppError> {
    writer
        .start_file(path, options)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to add {}: {}", path, e)))?;
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write {}: {}", path, e)))?;
    Ok(())
}

/// Append `.dart` to page/widget names that lack an extension.
fn with_dart_ext(name: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{}.dart", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_bundle() -> FlutterBundle {
        let mut pages = BTreeMap::new();
        pages.insert("home".to_string(), "class HomePage {}".to_string());
        pages.insert("cart.dart".to_string(), "class CartPage {}".to_string());
        let mut widgets = BTreeMap::new();
        widgets.insert("product_card".to_string(), "class ProductCard {}".to_string());
        FlutterBundle {
            main_dart: "void main() {}".to_string(),
            pubspec_yaml: "name: shop".to_string(),
            pages,
            widgets,
            assets: vec!["logo.png".to_string()],
        }
    }

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_zip_layout() {
        let bytes = bundle_to_zip(&sample_bundle()).unwrap();
        let names = entry_names(&bytes);

        assert!(names.contains(&"pubspec.yaml".to_string()));
        assert!(names.contains(&"lib/main.dart".to_string()));
        assert!(names.contains(&"lib/pages/home.dart".to_string()));
        assert!(names.contains(&"lib/pages/cart.dart".to_string()));
        assert!(names.contains(&"lib/widgets/product_card.dart".to_string()));
        assert!(names.contains(&"assets/logo.png".to_string()));
    }

    #[test]
    fn test_zip_round_trips_source_text() {
        let bytes = bundle_to_zip(&sample_bundle()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut main = String::new();
        archive
            .by_name("lib/main.dart")
            .unwrap()
            .read_to_string(&mut main)
            .unwrap();
        assert_eq!(main, "void main() {}");
    }

    #[test]
    fn test_dart_extension_only_added_when_missing() {
        assert_eq!(with_dart_ext("home"), "home.dart");
        assert_eq!(with_dart_ext("home.dart"), "home.dart");
    }
}
