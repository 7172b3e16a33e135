use std::{io::Cursor, path::Path};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use makedds::{write_dds, Decoder, ImageResampler, Job, Pixels, RawImage, SourceError};

struct SolidDecoder {
    width: u32,
    height: u32,
}

impl Decoder for SolidDecoder {
    fn decode(&mut self, _path: &Path) -> Result<RawImage, SourceError> {
        let data = [64u8, 128, 192, 255].repeat((self.width * self.height) as usize);
        Ok(RawImage::new(self.width, self.height, 4, Pixels::U8(data)))
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("write_dds", |b| {
        b.iter(|| {
            let mut job = Job {
                mipmaps: true,
                ..Job::single("image.png", "image.dds")
            };
            let mut output = Cursor::new(Vec::new());
            write_dds(
                &mut job,
                &mut output,
                black_box(SolidDecoder {
                    width: 512,
                    height: 512,
                }),
                ImageResampler::default(),
            )
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
