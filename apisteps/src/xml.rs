use crate::error::Error;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use serde_json::{Map, Value};

const TEXT_KEY: &str = "$text";
const ATTRIBUTE_PREFIX: &str = "@";

/// Reads an XML document into `{"root": ...}`. Elements holding only text
/// become strings; otherwise attributes land under `@name`, text under
/// `$text` and repeated children form an array.
pub(crate) fn to_value(document: &[u8]) -> Result<Value, Error> {
    let mut reader = Reader::from_reader(document);
    reader.trim_text(true);

    let mut open_elements: Vec<Element> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => open_elements.push(Element::open(&reader, &start)?),
            Event::Empty(start) => {
                Element::open(&reader, &start)?.close(&mut open_elements, &mut root)?
            }
            Event::End(_) => match open_elements.pop() {
                Some(element) => element.close(&mut open_elements, &mut root)?,
                None => return Err(Error::Deserialization("unexpected closing tag".into())),
            },
            Event::Text(text) => append_text(&mut open_elements, &text.unescape()?)?,
            Event::CData(data) => {
                append_text(&mut open_elements, &reader.decoder().decode(&data)?)?
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open_elements.last() {
        return Err(Error::Deserialization(format!(
            "element <{}> is not closed",
            element.name
        )));
    }

    match root {
        Some((name, value)) => {
            let mut document = Map::new();
            document.insert(name, value);
            Ok(Value::Object(document))
        }
        None => Err(Error::Deserialization(
            "XML document has no root element".into(),
        )),
    }
}

#[derive(Debug)]
struct Element {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<Self, Error> {
        let decoder = reader.decoder();
        let mut fields = Map::new();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = decoder.decode(attribute.key.as_ref())?;
            fields.insert(
                format!("{}{}", ATTRIBUTE_PREFIX, key),
                Value::String(attribute.unescape_value()?.into_owned()),
            );
        }

        Ok(Self {
            name: decoder.decode(start.name().as_ref())?.into_owned(),
            fields,
            text: String::new(),
        })
    }

    fn close(
        self,
        open_elements: &mut [Element],
        root: &mut Option<(String, Value)>,
    ) -> Result<(), Error> {
        let (name, value) = self.into_entry();

        match open_elements.last_mut() {
            Some(parent) => parent.add_child(name, value),
            None if root.is_none() => *root = Some((name, value)),
            None => {
                return Err(Error::Deserialization(format!(
                    "second root element <{}>",
                    name
                )))
            }
        }

        Ok(())
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.fields.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.fields.insert(name, value);
            }
        }
    }

    fn into_entry(self) -> (String, Value) {
        let Element {
            name,
            mut fields,
            text,
        } = self;

        if fields.is_empty() {
            return (name, Value::String(text));
        }
        if !text.is_empty() {
            fields.insert(TEXT_KEY.to_string(), Value::String(text));
        }

        (name, Value::Object(fields))
    }
}

fn append_text(open_elements: &mut [Element], text: &str) -> Result<(), Error> {
    match open_elements.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None => Err(Error::Deserialization(format!(
            "text \"{}\" outside of the root element",
            text
        ))),
    }
}
