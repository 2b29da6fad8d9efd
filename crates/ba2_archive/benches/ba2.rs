use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

#[path = "../tests/common/mod.rs"]
mod common;

fn main() {
    divan::main();
}

pub mod read {
    use ba2_archive::Ba2Archive;
    use divan::Bencher;

    use crate::common::{general_archive, StoredFile};

    fn get_input() -> Vec<u8> {
        let files: Vec<StoredFile> = (0..512)
            .map(|i| {
                let content = format!("record {i} ").repeat(64);
                if i % 2 == 0 {
                    StoredFile::zlib(&format!(r"data\{i:04}.txt"), content.as_bytes())
                } else {
                    StoredFile::raw(&format!(r"data\{i:04}.txt"), content.as_bytes())
                }
            })
            .collect();
        general_archive(&files, true)
    }

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_values(|data| {
            divan::black_box(Ba2Archive::from_bytes(data).unwrap());
        });
    }

    #[divan::bench]
    fn access_file(bencher: Bencher) {
        bencher
            .with_inputs(|| Ba2Archive::from_bytes(get_input()).unwrap())
            .bench_refs(|ba2| {
                divan::black_box(ba2.by_index(0).unwrap());
            });
    }

    #[divan::bench(sample_count = 1)]
    fn read_file_all(bencher: Bencher) {
        let ba2 = Ba2Archive::from_bytes(get_input()).unwrap();

        bencher.bench_local(move || {
            for i in 0..ba2.len() {
                divan::black_box(ba2.read_file(i).unwrap());
            }
        });
    }
}
