use std::str::FromStr;

fn main() {
    let args: Vec<_> = std::env::args().collect();

    // Inherit the format from the image if none is specified.
    let format = args
        .get(3)
        .map(|f| makedds::DxgiFormat::from_str(f).unwrap());

    let mut job = makedds::Job {
        format,
        mipmaps: true,
        ..makedds::Job::single(&args[1], &args[2])
    };

    let start = std::time::Instant::now();
    let summary = makedds::write_dds_file(&mut job).unwrap();
    println!(
        "Wrote {} surfaces and {} bytes in {:?}",
        summary.surfaces,
        summary.file_bytes,
        start.elapsed()
    );
}
