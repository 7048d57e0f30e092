//! Document assembly
//!
//! Concatenates documents page by page and writes the page tree of
//! documents the pipeline builds from scratch.

use crate::constants::{INHERITABLE_PAGE_KEYS, OUTPUT_PDF_VERSION};
use crate::render::inherited_attribute;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Merge documents into one, keeping pages in input order.
///
/// Pages keep their inherited attributes (resources, boxes, rotation) even
/// though the source page trees are discarded. Objects that are no longer
/// reachable are pruned.
pub fn merge_in_order(pieces: Vec<Document>) -> Result<Document> {
    if pieces.is_empty() {
        return Err(NupError::Assembly("no documents to merge".to_string()));
    }

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut next_id = 1;

    for mut piece in pieces {
        piece.renumber_objects_with(next_id);
        next_id = piece.max_id + 1;

        // Page dictionaries with everything they inherit made explicit
        let page_ids: Vec<ObjectId> = piece.get_pages().into_values().collect();
        for page_id in page_ids {
            pages.push((page_id, materialize_page(&piece, page_id)?));
        }

        for (id, object) in piece.objects {
            if !is_page_tree_node(&object) {
                output.objects.insert(id, object);
            }
        }
    }

    if pages.is_empty() {
        return Err(NupError::Assembly("merged documents contain no pages".to_string()));
    }

    output.max_id = next_id - 1;
    let pages_id = output.new_object_id();

    let mut page_ids = Vec::with_capacity(pages.len());
    for (page_id, mut page_dict) in pages {
        page_dict.set("Parent", Object::Reference(pages_id));
        output.objects.insert(page_id, Object::Dictionary(page_dict));
        page_ids.push(page_id);
    }

    write_page_tree(&mut output, pages_id, &page_ids);
    output.prune_objects();

    log::debug!("Merged {} pages", page_ids.len());
    Ok(output)
}

/// Write a flat `/Pages` node holding `page_ids` and point the catalog at it.
pub fn write_page_tree(output: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) {
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_ids.len() as i64)),
    ]);
    output
        .objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

/// Keep only the first `count` pages of a document.
pub fn extract_pages(document: &Document, count: usize) -> Result<Document> {
    let mut extracted = document.clone();
    let page_numbers: Vec<u32> = extracted
        .get_pages()
        .into_keys()
        .filter(|&number| number as usize > count)
        .collect();

    if !page_numbers.is_empty() {
        extracted.delete_pages(&page_numbers);
        extracted.prune_objects();
    }

    if extracted.get_pages().is_empty() {
        return Err(NupError::EmptyDocument);
    }
    Ok(extracted)
}

/// Copy of a page dictionary with inherited attributes set directly on it
fn materialize_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page_dict = doc.get_dictionary(page_id)?.clone();

    for key in INHERITABLE_PAGE_KEYS {
        if page_dict.has(key) {
            continue;
        }
        if let Some(value) = inherited_attribute(doc, page_id, key)? {
            page_dict.set(key.to_vec(), value.clone());
        }
    }

    Ok(page_dict)
}

fn is_page_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(|t| t.as_name())
        .map(|name| name == b"Pages" || name == b"Catalog")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Stream;

    fn single_page_doc(width: i64) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(vec![Object::Reference(page_id)])),
                ("Count", Object::Integer(1)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(width),
                        Object::Integer(100),
                    ]),
                ),
            ])),
        );
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn page_width(doc: &Document, page_id: ObjectId) -> f32 {
        crate::render::read_page_box(doc, page_id, BoxType::MediaBox)
            .unwrap()
            .width
    }

    #[test]
    fn test_merge_keeps_input_order() {
        let pieces = vec![
            single_page_doc(100),
            single_page_doc(200),
            single_page_doc(300),
        ];
        let merged = merge_in_order(pieces).unwrap();

        let widths: Vec<f32> = merged
            .get_pages()
            .values()
            .map(|&id| page_width(&merged, id))
            .collect();
        assert_eq!(widths, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_merge_materializes_inherited_media_box() {
        let merged = merge_in_order(vec![single_page_doc(250)]).unwrap();
        let page_id = *merged.get_pages().values().next().unwrap();
        let page = merged.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
    }

    #[test]
    fn test_merge_empty_input_fails() {
        assert!(matches!(
            merge_in_order(Vec::new()),
            Err(NupError::Assembly(_))
        ));
    }

    #[test]
    fn test_extract_pages() {
        let merged = merge_in_order(vec![
            single_page_doc(100),
            single_page_doc(200),
            single_page_doc(300),
        ])
        .unwrap();

        let first_two = extract_pages(&merged, 2).unwrap();
        assert_eq!(first_two.get_pages().len(), 2);

        let all = extract_pages(&merged, 10).unwrap();
        assert_eq!(all.get_pages().len(), 3);

        assert!(matches!(
            extract_pages(&merged, 0),
            Err(NupError::EmptyDocument)
        ));
    }
}
