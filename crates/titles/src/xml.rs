use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Local name of the first element in the document.
///
/// The serde deserializer doesn't look at the root element's name at all, so
/// without this check an `<error>` reply would happily deserialize into an
/// empty record.
pub(crate) fn root_element(xml: &[u8], document: &'static str) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    loop {
        match reader.read_event().or_raise(|| ErrorKind::MalformedXml(document))? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            },
            Event::Eof => exn::bail!(ErrorKind::MalformedXml(document)),
            _ => {},
        }
    }
}

pub(crate) fn expect_root(xml: &[u8], expected: &'static str, document: &'static str) -> Result<()> {
    let found = root_element(xml, document)?;
    if found != expected {
        exn::bail!(ErrorKind::UnexpectedRoot { expected, found });
    }
    Ok(())
}
