//! Shared fixture builders for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use lopdf::{dictionary, Document, Object};
use zip::write::SimpleFileOptions;

/// Writes a one-page PDF whose info dictionary carries the given
/// title/author/producer strings.
pub fn write_pdf(path: &Path, title: &str, author: &str, producer: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(Object::Dictionary(dictionary! {
        "Title" => Object::string_literal(title),
        "Author" => Object::string_literal(author),
        "Producer" => Object::string_literal(producer),
    }));
    doc.trailer.set("Info", Object::Reference(info_id));
    doc.save(path).unwrap();
}

/// Writes a minimal office package with core and extended property parts.
pub fn write_docx(path: &Path, creator: &str, company: &str) {
    let core = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:creator>{creator}</dc:creator>
  <dc:title>Fixture Document</dc:title>
</cp:coreProperties>"#
    );
    let app = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>FixtureWriter</Application>
  <Company>{company}</Company>
</Properties>"#
    );

    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, contents) in [("docProps/core.xml", core), ("docProps/app.xml", app)] {
        writer
            .start_file(name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}
