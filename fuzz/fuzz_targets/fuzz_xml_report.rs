#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Vendor files arrive as arbitrary bytes; sanitizing must always succeed
    let source = labxml::xml::sanitize(data);

    // Rendering never fails: malformed input degrades to a raw dump
    let _ = labxml::report::render_source(&source);

    // Anything that parses must also serialize
    if let Ok(mut document) = labxml::xml::parse_document(&source) {
        let _ = labxml::xml::write_document(&document);
        let _ = labxml::decoders::decode_xml_content_blocks(&mut document.root);
    }
});
