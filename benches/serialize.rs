use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use xmpmodel::{
    Date, DublinCore, LangAlt, Packet, ProperName, SerializeOptions, Text, XmpSerializer,
};

fn create_simple_packet() -> Packet {
    let mut packet = Packet::new();
    packet.insert(DublinCore {
        coverage: Text::new("Global"),
        ..Default::default()
    });
    packet
}

fn create_full_packet(count: usize) -> Packet {
    let mut title = LangAlt::with_default("Harbour at dawn");
    title.set("de", "Hafen im Morgengrauen");

    let dc = DublinCore {
        title,
        format: Text::new("image/jpeg"),
        creator: (0..count)
            .map(|i| ProperName::new(format!("Author {}", i)).unwrap())
            .collect(),
        subject: (0..count).map(|i| Text::new(format!("keyword {}", i))).collect(),
        date: vec![Date::ymd(2021, 3, 14).unwrap()].into(),
        ..Default::default()
    };

    let mut packet = Packet::new();
    packet.set_about(Some("urn:example:bench".parse().unwrap()));
    packet.insert(dc);
    packet
}

fn bench_serialize_simple(c: &mut Criterion) {
    let packet = create_simple_packet();
    c.bench_function("serialize_simple", |b| {
        b.iter(|| {
            let _xml = XmpSerializer::new().serialize(black_box(&packet)).unwrap();
        });
    });
}

fn bench_serialize_full(c: &mut Criterion) {
    let packet = create_full_packet(100);
    c.bench_function("serialize_full", |b| {
        b.iter(|| {
            let _xml = black_box(&packet).to_xml_string().unwrap();
        });
    });
}

fn bench_serialize_wrapped_compact(c: &mut Criterion) {
    let packet = create_full_packet(100);
    let options = SerializeOptions::default()
        .packet_wrapper()
        .padding(2048)
        .compact();
    c.bench_function("serialize_wrapped_compact", |b| {
        b.iter(|| {
            let _xml = XmpSerializer::new()
                .with_options(options)
                .serialize(black_box(&packet))
                .unwrap();
        });
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let xml = create_full_packet(50).to_xml_string().unwrap();
    c.bench_function("round_trip", |b| {
        b.iter(|| {
            let packet: Packet = black_box(xml.as_str()).parse().unwrap();
            let _xml = packet.to_xml_string().unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_serialize_simple,
    bench_serialize_full,
    bench_serialize_wrapped_compact,
    bench_round_trip
);
criterion_main!(benches);
