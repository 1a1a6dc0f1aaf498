use std::hint::black_box;

use divan::Bencher;
use tagtree::binary::{decode, encode};
use tagtree::snbt::{parse, to_snbt_string};
use tagtree::{compound, Compound, List, Tag};

fn main() {
    divan::main();
}

/// Something shaped like a chunk section with a few block entities.
fn sample() -> Tag {
    let entity = |i: i32| {
        Tag::Compound(compound! {
            "id" => "minecraft:chest",
            "x" => i,
            "y" => 64,
            "z" => -i,
            "CustomName" => "Treasure ✦",
            "Items" => List::try_from(
                (0..8_i8)
                    .map(|slot| Tag::Compound(compound! { "Slot" => slot, "Count" => 64_i8 }))
                    .collect::<Vec<_>>(),
            )
            .unwrap(),
        })
    };

    Tag::Compound(compound! {
        "DataVersion" => 3700,
        "BlockStates" => (0..4096_i64).collect::<Vec<_>>(),
        "Biomes" => vec![1_i8; 64],
        "BlockEntities" => List::try_from((0..16).map(entity).collect::<Vec<_>>()).unwrap(),
        "Heightmap" => Compound::new(),
    })
}

#[divan::bench]
fn binary_encode(bencher: Bencher) {
    let tag = sample();

    bencher.bench_local(|| {
        let mut buf = vec![];
        let _ = black_box(encode(&mut buf, "", black_box(&tag)));
        buf
    });
}

#[divan::bench]
fn binary_decode(bencher: Bencher) {
    let mut buf = vec![];
    encode(&mut buf, "", &sample()).unwrap();

    bencher.bench_local(|| {
        let mut r = black_box(buf.as_slice());
        let _ = black_box(decode(&mut r));
    });
}

#[divan::bench]
fn snbt_write(bencher: Bencher) {
    let tag = sample();

    bencher.bench_local(|| black_box(to_snbt_string(black_box(&tag))));
}

#[divan::bench]
fn snbt_parse(bencher: Bencher) {
    let text = to_snbt_string(&sample());

    bencher.bench_local(|| {
        let _ = black_box(parse(black_box(&text)));
    });
}
