#![no_main]

use libfuzzer_sys::fuzz_target;
use makedds::{layout, AlphaMode, DdsHeaders, DxgiFormat, Job};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    width: u32,
    height: u32,
    max_mip_levels: u32,
    array_size: Option<u32>,
    format: DxgiFormat,
    alpha_mode: Option<AlphaMode>,
    mipmaps: bool,
    cubemap: bool,
    volume: bool,
    source_count: u8,
}

fuzz_target!(|input: Input| {
    let mut job = Job {
        width: input.width,
        height: input.height,
        max_mip_levels: input.max_mip_levels,
        array_size: input.array_size,
        format: Some(input.format),
        alpha_mode: input.alpha_mode,
        mipmaps: input.mipmaps,
        cubemap: input.cubemap,
        volume: input.volume,
        sources: (0..input.source_count)
            .map(|i| format!("{i}.png").into())
            .collect(),
        ..Default::default()
    };

    if job.prepare().is_ok() {
        if let Ok(headers) = DdsHeaders::from_job(&job) {
            let bytes = headers.to_bytes();
            assert_eq!(b"DDS ", &bytes[..4]);
            assert_eq!(input.format as u32, u32::from_le_bytes(bytes[128..132].try_into().unwrap()));
        }

        for level in 0..job.mip_levels().min(32) {
            let width = layout::level_dimension(job.width, level);
            let height = layout::level_dimension(job.height, level);
            let _size = layout::level_size(input.format, width, height, job.depth());
            assert!(layout::image_dimension(input.format, width) >= 1);
        }
    }
});
