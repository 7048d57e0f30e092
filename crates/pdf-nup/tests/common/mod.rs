//! Fixture documents and inspection helpers shared by the integration tests

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// One page of a fixture document
#[derive(Debug, Clone, Copy)]
pub struct TestPage {
    pub width: i64,
    pub height: i64,
    pub rotate: i64,
    pub broken: bool,
}

impl TestPage {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            rotate: 0,
            broken: false,
        }
    }

    pub fn letter() -> Self {
        Self::new(612, 792)
    }

    pub fn rotated(mut self, degrees: i64) -> Self {
        self.rotate = degrees;
        self
    }

    /// Page whose content stream reference points at a missing object
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

/// Marker written into the content stream of fixture page `index`
pub fn marker(index: usize) -> String {
    format!("page-{}", index)
}

pub fn create_test_pdf(num_pages: usize) -> Document {
    create_pdf_with_pages(&vec![TestPage::letter(); num_pages])
}

pub fn create_pdf_with_pages(pages: &[TestPage]) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let content_ref = if page.broken {
            Object::Reference((9999, 0))
        } else {
            let content = format!("% marker {}\nq 0 0 m 10 10 l S Q\n", marker(index));
            Object::Reference(doc.add_object(Stream::new(Dictionary::new(), content.into_bytes())))
        };

        let mut page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(page.width),
                    Object::Integer(page.height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", content_ref),
        ]);
        if page.rotate != 0 {
            page_dict.set("Rotate", Object::Integer(page.rotate));
        }
        kids.push(Object::Reference(doc.add_object(page_dict)));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(pages.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// A source page drawn on an output page: the lower-left corner of its
/// clip cell and the markers of everything drawn inside it
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub markers: Vec<String>,
}

/// Placements of an output page in drawing order
pub fn placements(doc: &Document, page_id: ObjectId) -> Vec<Placement> {
    let page = doc.get_dictionary(page_id).unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    let resources = resolve(doc, page.get(b"Resources").unwrap()).as_dict().unwrap();

    String::from_utf8_lossy(&content)
        .lines()
        .filter(|line| line.ends_with("Do Q"))
        .map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let name = tokens[tokens.len() - 3].trim_start_matches('/');
            Placement {
                x: tokens[1].parse().unwrap(),
                y: tokens[2].parse().unwrap(),
                markers: xobject_markers(doc, resources, name),
            }
        })
        .collect()
}

/// All markers drawn on an output page, in drawing order
pub fn page_markers(doc: &Document, page_id: ObjectId) -> Vec<String> {
    placements(doc, page_id)
        .into_iter()
        .flat_map(|p| p.markers)
        .collect()
}

fn xobject_markers(doc: &Document, resources: &Dictionary, name: &str) -> Vec<String> {
    let xobjects = resolve(doc, resources.get(b"XObject").unwrap())
        .as_dict()
        .unwrap();
    let stream = resolve(doc, xobjects.get(name.as_bytes()).unwrap())
        .as_stream()
        .unwrap();
    let text = String::from_utf8_lossy(&stream.content).to_string();

    let mut markers = Vec::new();
    for line in text.lines() {
        if let Some(marker) = line.strip_prefix("% marker ") {
            markers.push(marker.trim().to_string());
        } else if line.ends_with("Do Q") {
            // Normalized pages wrap the source page in one more XObject
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let nested = tokens[tokens.len() - 3].trim_start_matches('/');
            let nested_resources = resolve(doc, stream.dict.get(b"Resources").unwrap())
                .as_dict()
                .unwrap();
            markers.extend(xobject_markers(doc, nested_resources, nested));
        }
    }
    markers
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap(),
        _ => obj,
    }
}
