use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use xmpmodel::{ModelRegistry, Packet, XmpParser};

// Single attribute-form property
const SIMPLE_XMP: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <rdf:Description rdf:about="urn:example:simple" dc:coverage="Global"/>
</rdf:RDF>
<?xpacket end="w"?>"#;

// Dublin Core arrays plus properties of unregistered namespaces
const MIXED_XMP: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:xmp="http://ns.adobe.com/xap/1.0/"
         xmlns:dc="http://purl.org/dc/elements/1.1/"
         xmlns:tiff="http://ns.adobe.com/tiff/1.0/">
  <rdf:Description rdf:about=""
                   xmp:CreatorTool="Image Editor 4.2"
                   xmp:CreateDate="2021-03-14T09:26:53+01:00"
                   tiff:Orientation="1">
    <dc:format>image/jpeg</dc:format>
    <dc:title>
      <rdf:Alt>
        <rdf:li xml:lang="x-default">Harbour at dawn</rdf:li>
        <rdf:li xml:lang="de">Hafen im Morgengrauen</rdf:li>
        <rdf:li xml:lang="ja">夜明けの港</rdf:li>
      </rdf:Alt>
    </dc:title>
    <dc:creator>
      <rdf:Seq>
        <rdf:li>Ada Example</rdf:li>
        <rdf:li>Grace Sample</rdf:li>
      </rdf:Seq>
    </dc:creator>
    <dc:date>
      <rdf:Seq>
        <rdf:li>2021-03-14T09:26:53+01:00</rdf:li>
        <rdf:li>2021-04</rdf:li>
      </rdf:Seq>
    </dc:date>
    <dc:subject>
      <rdf:Bag>
        <rdf:li>harbour</rdf:li>
        <rdf:li>boats</rdf:li>
        <rdf:li>morning</rdf:li>
        <rdf:li>fog</rdf:li>
      </rdf:Bag>
    </dc:subject>
    <xmp:Rating>4</xmp:Rating>
  </rdf:Description>
</rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

/// Packet with `count` subject keywords and creators
fn large_xmp(count: usize) -> String {
    let mut xml = String::from(
        r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <rdf:Description rdf:about="urn:example:large">
    <dc:subject><rdf:Bag>"#,
    );
    for i in 0..count {
        xml.push_str(&format!("<rdf:li>keyword {}</rdf:li>", i));
    }
    xml.push_str("</rdf:Bag></dc:subject>\n    <dc:creator><rdf:Seq>");
    for i in 0..count {
        xml.push_str(&format!("<rdf:li>Author {}</rdf:li>", i));
    }
    xml.push_str("</rdf:Seq></dc:creator>\n  </rdf:Description>\n</rdf:RDF>");
    xml
}

fn bench_parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple", |b| {
        b.iter(|| {
            let _packet: Packet = black_box(SIMPLE_XMP).parse().unwrap();
        });
    });
}

fn bench_parse_mixed(c: &mut Criterion) {
    c.bench_function("parse_mixed", |b| {
        b.iter(|| {
            let _packet = XmpParser::new().parse_str(black_box(MIXED_XMP)).unwrap();
        });
    });
}

fn bench_parse_generic_only(c: &mut Criterion) {
    // Nothing registered: every property goes to the generic fallback
    let registry = ModelRegistry::new();
    c.bench_function("parse_generic_only", |b| {
        b.iter(|| {
            let _packet = XmpParser::with_registry(&registry)
                .parse_str(black_box(MIXED_XMP))
                .unwrap();
        });
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let xml = large_xmp(500);
    c.bench_function("parse_large", |b| {
        b.iter(|| {
            let _packet = Packet::read(black_box(xml.as_bytes())).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_parse_simple,
    bench_parse_mixed,
    bench_parse_generic_only,
    bench_parse_large
);
criterion_main!(benches);
