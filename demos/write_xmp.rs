//! Build an XMP packet and write it to a file
//!
//! Reads an existing packet if the input file exists, sets a few Dublin
//! Core properties and writes the result with a packet wrapper.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use xmpmodel::{
    default_registry, Date, DublinCore, LangAlt, Packet, ProperName, SerializeOptions, Text,
};

fn write_xmp_to_file() -> Result<(), Box<dyn std::error::Error>> {
    // Expected: input_file output_file
    let args: Vec<String> = env::args().collect();

    let (input_path, output_path) = match args.len() {
        3 => Ok((&args[1], &args[2])),
        n => Err(format!(
            "expected 2 arguments (input_file output_file), got {} arguments",
            n - 1
        )),
    }?;

    let mut packet = if Path::new(input_path).exists() {
        Packet::read_file(input_path)?
    } else {
        Packet::new()
    };

    let mut dc = packet.get::<DublinCore>().cloned().unwrap_or_default();

    let mut title = LangAlt::with_default("My Document Title");
    title.set("zh-CN", "我的文档标题");
    dc.title = title;
    dc.description = LangAlt::with_default("This is a sample document with XMP metadata.");
    dc.rights = LangAlt::with_default("Copyright 2024 Example Corp. All rights reserved.");

    dc.creator.push(ProperName::new("John Doe")?);
    dc.subject.insert(Text::new("sample"));
    dc.subject.insert(Text::new("xmp"));
    dc.date.push(Date::parse("2024-01-15T10:30:00+08:00")?);
    dc.format = Text::new("application/pdf");

    packet.insert(dc);
    if packet.about().is_none() {
        packet.set_about(Some("urn:example:document".parse()?));
    }

    let writer = BufWriter::new(File::create(output_path)?);
    let options = SerializeOptions::default().packet_wrapper().padding(2048);
    packet.write_with(writer, default_registry(), options)?;

    println!("Wrote {}", output_path);
    Ok(())
}

fn main() {
    if let Err(e) = write_xmp_to_file() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
