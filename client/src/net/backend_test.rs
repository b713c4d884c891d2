use super::*;

#[test]
fn document_mime_matches_allowed_extensions() {
    assert_eq!(document_mime("guide.PDF"), "application/pdf");
    assert_eq!(
        document_mime("notes.docx"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(document_mime("readme.txt"), "text/plain");
    assert_eq!(document_mime("archive"), "application/octet-stream");
}
