//! Wire schema types for the Translator Text API v2 endpoints

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TranslationError};

/// Namespace of the `<string>` items inside `<Texts>`
pub const ARRAYS_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/Arrays";

/// Body of the `/Translate` response: a single element holding the translation
///
/// ```xml
/// <string xmlns="http://schemas.microsoft.com/2003/10/Serialization/">私は</string>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateResponse {
    pub translated_text: String,
}

impl TranslateResponse {
    /// Decode the body. Character content is kept exactly as sent.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = xml_reader(xml);
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut translated_text = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(_) => {
                    if depth == 0 {
                        open_root(&mut seen_root)?;
                    }
                    depth += 1;
                }
                Event::Empty(_) => {
                    if depth == 0 {
                        open_root(&mut seen_root)?;
                    }
                }
                Event::End(_) => depth = close_element(depth)?,
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if depth > 0 {
                        translated_text.push_str(&text);
                    } else {
                        outside_root(&text)?;
                    }
                }
                Event::CData(data) => {
                    if depth > 0 {
                        translated_text.push_str(&String::from_utf8_lossy(&data));
                    } else {
                        return Err(decode_error("character data outside the root element"));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        finish_document(seen_root, depth)?;
        Ok(Self { translated_text })
    }
}

/// `<TranslateArrayRequest>` envelope posted to `/TranslateArray`
#[derive(Debug, Serialize)]
#[serde(rename = "TranslateArrayRequest")]
pub struct TranslateArrayRequest<'a> {
    #[serde(rename = "AppId")]
    app_id: &'a str,
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "Options")]
    options: TranslateArrayOptions,
    #[serde(rename = "Texts")]
    texts: Texts<'a>,
    #[serde(rename = "To")]
    to: &'a str,
}

#[derive(Debug, Serialize)]
struct TranslateArrayOptions {
    #[serde(rename = "ContentType")]
    content_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Texts<'a> {
    #[serde(rename = "string")]
    items: Vec<ArrayString<'a>>,
}

#[derive(Debug, Serialize)]
struct ArrayString<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "$text")]
    text: &'a str,
}

impl<'a> TranslateArrayRequest<'a> {
    pub fn new<S: AsRef<str>>(texts: &'a [S], from: &'a str, to: &'a str) -> Self {
        Self {
            app_id: "",
            from,
            options: TranslateArrayOptions {
                content_type: "text/plain",
            },
            texts: Texts {
                items: texts
                    .iter()
                    .map(|text| ArrayString {
                        xmlns: ARRAYS_NAMESPACE,
                        text: text.as_ref(),
                    })
                    .collect(),
            },
            to,
        }
    }

    /// Serialize the envelope; text content is escaped by the writer
    pub fn to_xml(&self) -> Result<String> {
        quick_xml::se::to_string(self).map_err(|e| TranslationError::EncodeError {
            message: e.to_string(),
        })
    }
}

/// Body of the `/TranslateArray` response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayOfTranslateArrayResponse {
    pub responses: Vec<TranslateArrayResponse>,
}

/// One translated record; unlisted elements such as sentence lengths are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateArrayResponse {
    pub from: String,
    pub translated_text: String,
}

const RECORD_ELEMENT: &[u8] = b"TranslateArrayResponse";

impl ArrayOfTranslateArrayResponse {
    /// Decode the body, one record per `<TranslateArrayResponse>` in document
    /// order. `From` and `TranslatedText` content is kept exactly as sent.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = xml_reader(xml);
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut seen_root = false;
        let mut responses: Vec<TranslateArrayResponse> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    let name = element.local_name().as_ref().to_vec();
                    if path.is_empty() {
                        open_root(&mut seen_root)?;
                    } else if path.len() == 1 && name == RECORD_ELEMENT {
                        responses.push(TranslateArrayResponse::default());
                    }
                    path.push(name);
                }
                Event::Empty(element) => {
                    if path.is_empty() {
                        open_root(&mut seen_root)?;
                    } else if path.len() == 1 && element.local_name().as_ref() == RECORD_ELEMENT {
                        responses.push(TranslateArrayResponse::default());
                    }
                }
                Event::End(_) => {
                    path.pop()
                        .ok_or_else(|| decode_error("unexpected closing tag"))?;
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if path.is_empty() {
                        outside_root(&text)?;
                    } else {
                        append_record_field(&path, &mut responses, &text);
                    }
                }
                Event::CData(data) => {
                    if path.is_empty() {
                        return Err(decode_error("character data outside the root element"));
                    }
                    append_record_field(&path, &mut responses, &String::from_utf8_lossy(&data));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        finish_document(seen_root, path.len())?;
        Ok(Self { responses })
    }
}

fn append_record_field(path: &[Vec<u8>], responses: &mut [TranslateArrayResponse], text: &str) {
    if path.len() != 3 || path[1] != RECORD_ELEMENT {
        return;
    }

    if let Some(record) = responses.last_mut() {
        match path[2].as_slice() {
            b"From" => record.from.push_str(text),
            b"TranslatedText" => record.translated_text.push_str(text),
            _ => {}
        }
    }
}

fn xml_reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    reader
}

fn decode_error(message: &str) -> TranslationError {
    TranslationError::DecodeError {
        message: message.to_string(),
    }
}

fn open_root(seen_root: &mut bool) -> Result<()> {
    if *seen_root {
        return Err(decode_error("multiple root elements"));
    }
    *seen_root = true;
    Ok(())
}

fn close_element(depth: usize) -> Result<usize> {
    depth
        .checked_sub(1)
        .ok_or_else(|| decode_error("unexpected closing tag"))
}

fn outside_root(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        Ok(())
    } else {
        Err(decode_error("text outside the root element"))
    }
}

fn finish_document(seen_root: bool, open_elements: usize) -> Result<()> {
    if !seen_root {
        return Err(decode_error("missing root element"));
    }
    if open_elements != 0 {
        return Err(decode_error("unexpected end of document"));
    }
    Ok(())
}

/// JSON error body returned with any non-200 status
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "statusCode", default)]
    pub status_code: i64,
    #[serde(default)]
    pub message: String,
}

/// Translation result: detected source language and translated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub source_lang: String,
    pub translation: String,
}

impl From<TranslateArrayResponse> for TranslationResult {
    fn from(response: TranslateArrayResponse) -> Self {
        Self {
            source_lang: response.from,
            translation: response.translated_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSLATE_FIXTURE: &str = r#"<string xmlns="http://schemas.microsoft.com/2003/10/Serialization/">私はゴーファーが大好き</string>"#;

    const TRANSLATE_ARRAY_FIXTURE: &str = r#"<ArrayOfTranslateArrayResponse xmlns="http://schemas.datacontract.org/2004/07/Microsoft.MT.Web.Service.V2" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <TranslateArrayResponse>
    <From>en</From>
    <OriginalTextSentenceLengths xmlns:a="http://schemas.microsoft.com/2003/10/Serialization/Arrays"><a:int>1</a:int></OriginalTextSentenceLengths>
    <TranslatedText>私</TranslatedText>
    <TranslatedTextSentenceLengths xmlns:a="http://schemas.microsoft.com/2003/10/Serialization/Arrays"><a:int>1</a:int></TranslatedTextSentenceLengths>
  </TranslateArrayResponse>
  <TranslateArrayResponse>
    <From>en</From>
    <OriginalTextSentenceLengths xmlns:a="http://schemas.microsoft.com/2003/10/Serialization/Arrays"><a:int>4</a:int></OriginalTextSentenceLengths>
    <TranslatedText>愛</TranslatedText>
    <TranslatedTextSentenceLengths xmlns:a="http://schemas.microsoft.com/2003/10/Serialization/Arrays"><a:int>1</a:int></TranslatedTextSentenceLengths>
  </TranslateArrayResponse>
  <TranslateArrayResponse>
    <From>en</From>
    <OriginalTextSentenceLengths xmlns:a="http://schemas.microsoft.com/2003/10/Serialization/Arrays"><a:int>3</a:int></OriginalTextSentenceLengths>
    <TranslatedText>あなた</TranslatedText>
    <TranslatedTextSentenceLengths xmlns:a="http://schemas.microsoft.com/2003/10/Serialization/Arrays"><a:int>3</a:int></TranslatedTextSentenceLengths>
  </TranslateArrayResponse>
</ArrayOfTranslateArrayResponse>"#;

    #[test]
    fn test_decode_translate_response() {
        let response = TranslateResponse::from_xml(TRANSLATE_FIXTURE).unwrap();
        assert_eq!(response.translated_text, "私はゴーファーが大好き");
    }

    #[test]
    fn test_decode_translate_array_response_keeps_order() {
        let response = ArrayOfTranslateArrayResponse::from_xml(TRANSLATE_ARRAY_FIXTURE).unwrap();

        let texts: Vec<&str> = response
            .responses
            .iter()
            .map(|r| r.translated_text.as_str())
            .collect();
        assert_eq!(texts, vec!["私", "愛", "あなた"]);
        assert!(response.responses.iter().all(|r| r.from == "en"));
    }

    #[test]
    fn test_decode_empty_translate_array_response() {
        let response = ArrayOfTranslateArrayResponse::from_xml(
            r#"<ArrayOfTranslateArrayResponse xmlns="http://schemas.datacontract.org/2004/07/Microsoft.MT.Web.Service.V2"></ArrayOfTranslateArrayResponse>"#,
        )
        .unwrap();
        assert!(response.responses.is_empty());
    }

    #[test]
    fn test_decode_malformed_xml_fails() {
        let result = ArrayOfTranslateArrayResponse::from_xml(
            "<ArrayOfTranslateArrayResponse><TranslateArrayResponse><From>en</Fro></TranslateArrayResponse>",
        );
        assert!(matches!(result, Err(TranslationError::DecodeError { .. })));
    }

    #[test]
    fn test_decode_truncated_xml_fails() {
        assert!(TranslateResponse::from_xml("<string>unterminated").is_err());
        assert!(TranslateResponse::from_xml("").is_err());
        assert!(ArrayOfTranslateArrayResponse::from_xml(
            "<ArrayOfTranslateArrayResponse><TranslateArrayResponse>"
        )
        .is_err());
    }

    #[test]
    fn test_decode_translate_response_keeps_whitespace() {
        let response = TranslateResponse::from_xml("<string>  hello world \n</string>").unwrap();
        assert_eq!(response.translated_text, "  hello world \n");

        let response = TranslateResponse::from_xml("<string>   </string>").unwrap();
        assert_eq!(response.translated_text, "   ");
    }

    #[test]
    fn test_decode_translate_response_unescapes_entities() {
        let response =
            TranslateResponse::from_xml("<string>Tom &amp; Jerry &lt;3<![CDATA[ <raw> ]]></string>")
                .unwrap();
        assert_eq!(response.translated_text, "Tom & Jerry <3 <raw> ");
    }

    #[test]
    fn test_decode_translate_array_response_keeps_whitespace() {
        let response = ArrayOfTranslateArrayResponse::from_xml(
            "<ArrayOfTranslateArrayResponse>\
             <TranslateArrayResponse><From>en</From><TranslatedText> a </TranslatedText></TranslateArrayResponse>\
             <TranslateArrayResponse><From>en</From><TranslatedText>   </TranslatedText></TranslateArrayResponse>\
             <TranslateArrayResponse><From>en</From><TranslatedText/></TranslateArrayResponse>\
             </ArrayOfTranslateArrayResponse>",
        )
        .unwrap();

        let texts: Vec<&str> = response
            .responses
            .iter()
            .map(|r| r.translated_text.as_str())
            .collect();
        assert_eq!(texts, vec![" a ", "   ", ""]);
    }

    #[test]
    fn test_encode_translate_array_request() {
        let texts = vec!["I", "love", "you & me <3"];
        let xml = TranslateArrayRequest::new(&texts, "en", "ja").to_xml().unwrap();

        assert!(xml.starts_with("<TranslateArrayRequest>"));
        assert!(xml.contains("<From>en</From>"));
        assert!(xml.contains("<To>ja</To>"));
        assert!(xml.contains("<ContentType>text/plain</ContentType>"));
        assert_eq!(xml.matches("<string ").count(), 3);
        assert!(xml.contains(&format!(r#"<string xmlns="{}">I</string>"#, ARRAYS_NAMESPACE)));
        assert!(xml.contains("you &amp; me &lt;3"));

        let first = xml.find(">I<").unwrap();
        let second = xml.find(">love<").unwrap();
        let third = xml.find(">you &amp;").unwrap();
        assert!(first < second && second < third);
        assert!(xml.find("<From>").unwrap() < xml.find("<Texts>").unwrap());
        assert!(xml.find("</Texts>").unwrap() < xml.find("<To>").unwrap());
    }

    #[test]
    fn test_decode_error_response() {
        let error: ErrorResponse =
            serde_json::from_str(r#"{"statusCode":401,"message":"bad key"}"#).unwrap();
        assert_eq!(error.status_code, 401);
        assert_eq!(error.message, "bad key");
    }

    #[test]
    fn test_translation_result_from_record() {
        let record = TranslateArrayResponse {
            from: "en".to_string(),
            translated_text: "私".to_string(),
        };
        let result = TranslationResult::from(record);
        assert_eq!(result.source_lang, "en");
        assert_eq!(result.translation, "私");
    }
}
