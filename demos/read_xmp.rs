//! Read an XMP packet from a file
//!
//! Prints the resource identifier, the Dublin Core properties, and the
//! raw property names of every namespace without a typed model.

use std::env;

use xmpmodel::{DublinCore, Packet};

fn read_xmp_from_file() -> Result<(), Box<dyn std::error::Error>> {
    // Expected: a single path to an .xmp sidecar or raw packet
    let args: Vec<String> = env::args().collect();

    let path = match args.len() {
        2 => Ok(&args[1]),
        n => Err(format!(
            "expected 1 argument (file name), got {} arguments",
            n - 1
        )),
    }?;

    let packet = Packet::read_file(path)?;

    match packet.about() {
        Some(about) => println!("about = {}", about),
        None => println!("about = (none)"),
    }

    if let Some(dc) = packet.get::<DublinCore>() {
        if let Some(title) = dc.title.default_text() {
            println!("dc:title = {}", title);
        }
        for (index, creator) in dc.creator.iter().enumerate() {
            println!("dc:creator[{}] = {}", index, creator);
        }
        for date in dc.date.iter() {
            println!("dc:date = {}", date);
        }
        for subject in dc.subject.iter() {
            println!("dc:subject = {}", subject);
        }
        if !dc.coverage.is_empty() {
            println!("dc:coverage = {}", dc.coverage);
        }
    } else {
        println!("No Dublin Core properties found");
    }

    // Namespaces without a registered model keep their properties as captured
    for namespace in packet.models().keys() {
        if let Some(generic) = packet.generic(namespace) {
            for property in generic.properties() {
                println!("{} {} ({} tokens)", namespace, property.name, property.span.len());
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = read_xmp_from_file() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
