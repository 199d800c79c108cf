use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use fimpfs::fat::*;

criterion_group!(benches, fat16_bench, fat12_bench);
criterion_main!(benches);

const PAYLOAD_BYTES: usize = 1024 * 1024;

fn blank_image(bpb: &FatBpb) -> Vec<u8> {
    let meta = FatMeta::from_bpb(bpb).expect("geometry");
    let size = bpb.total_sectors() as usize * meta.bytes_per_sector as usize;

    let mut buf = vec![0u8; size];
    let mut io = MemBlockIO::new(&mut buf);
    io.write_struct(0, bpb).expect("bpb");
    let reserved: &[u8] = match meta.kind {
        FatKind::Fat12 => &[0xF8, 0xFF, 0xFF],
        FatKind::Fat16 => &[0xF8, 0xFF, 0xFF, 0xFF],
    };
    for fi in 0..meta.num_fats {
        io.write_at(meta.fat_offset(fi), reserved).expect("reserved entries");
    }
    buf
}

fn bench_geometry(c: &mut Criterion, label: &str, bpb: FatBpb) {
    let image = blank_image(&bpb);
    let meta = FatMeta::from_bpb(&bpb).expect("geometry");
    let mut payload: Vec<u8> = (0..PAYLOAD_BYTES).map(|i| i as u8).collect();

    c.bench_function(&format!("{label}_plan"), |b| {
        let mut buf = image.clone();
        let mut io = MemBlockIO::new(&mut buf);
        b.iter(|| {
            let mut injector = FatInjector::new(&mut io, &meta);
            injector.plan("bench.bin", PAYLOAD_BYTES as u64).expect("plan failed");
        });
    });

    c.bench_function(&format!("{label}_inject_mem"), |b| {
        b.iter_batched(
            || image.clone(),
            |mut buf| {
                let mut io = MemBlockIO::new(&mut buf);
                let mut src = MemBlockIO::new(&mut payload);
                let mut injector = FatInjector::new(&mut io, &meta);
                injector
                    .inject("bench.bin", &mut src, PAYLOAD_BYTES as u64)
                    .expect("inject failed");
            },
            BatchSize::LargeInput,
        );
    });
}

pub fn fat16_bench(c: &mut Criterion) {
    // 32 MiB, 2 KiB clusters
    bench_geometry(c, "fat16", FatBpb::new(512, 4, 1, 2, 512, 65536, 64));
}

pub fn fat12_bench(c: &mut Criterion) {
    // 4 MiB, 1 KiB clusters
    bench_geometry(c, "fat12", FatBpb::new(512, 2, 1, 2, 224, 8192, 12));
}
