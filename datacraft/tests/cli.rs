use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn datacraft() -> Command {
    Command::cargo_bin("datacraft").unwrap()
}

fn world(root: &Path) -> std::path::PathBuf {
    let w = root.join("World");
    std::fs::create_dir(&w).unwrap();
    w
}

#[test]
fn no_arguments_prints_help_and_succeeds() {
    datacraft()
        .assert()
        .success()
        .stderr(predicate::str::contains("encode"))
        .stderr(predicate::str::contains("decode"));
}

#[test]
fn encode_then_decode_round_trip() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("photo.jpg");
    let data: Vec<u8> = (0..40_000u32).map(|i| (i * 13 + 1) as u8).collect();
    std::fs::write(&input, &data).unwrap();

    datacraft()
        .arg("encode")
        .arg(&input)
        .arg(&world)
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS! 3 maps created"))
        .stdout(predicate::str::contains("/give @p filled_map{map:1000000}"))
        .stdout(predicate::str::contains("... (up to 1000002)"))
        .stdout(predicate::function(|out: &str| {
            match (out.find("Range: 1000000 to 1000002"), out.find("map_1000000.dat")) {
                (Some(range), Some(first)) => range < first,
                _ => false,
            }
        }));

    let data_dir = world.join("data");
    for id in 1_000_000..=1_000_002 {
        assert!(data_dir.join(format!("map_{id}.dat")).is_file());
    }
    assert!(data_dir.join("idcounts.dat").is_file());
    let meta = std::fs::read_to_string(data_dir.join("mapstore_meta_1000000.txt")).unwrap();
    assert!(meta.contains("Filename: photo.jpg"));
    assert!(meta.contains("OriginalSize: 40000"));
    assert!(meta.contains("Maps: 3"));

    let out = temp.path().join("out.jpg");
    datacraft()
        .arg("decode")
        .arg(&world)
        .arg("1000000")
        .arg("3")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Trimming padding: 49152 -> 40000 bytes"))
        .stdout(predicate::str::contains("[100.0%] map_1000002.dat"));
    assert_eq!(std::fs::read(&out).unwrap(), data);
}

#[test]
fn custom_start_id_and_verify() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("notes.txt");
    std::fs::write(&input, b"hello maps").unwrap();

    datacraft()
        .args(["encode"])
        .arg(&input)
        .arg(&world)
        .arg("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Range: 42 to 42"));

    datacraft()
        .arg("verify")
        .arg(&world)
        .arg("42")
        .assert()
        .success()
        .stderr(predicate::str::contains("verify: OK"));

    datacraft()
        .arg("list")
        .arg(&world)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn zero_file_warns_blank() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("zeros.bin");
    std::fs::write(&input, vec![0u8; 20000]).unwrap();

    datacraft().arg("encode").arg(&input).arg(&world).assert().success();

    let out = temp.path().join("zeros.out");
    datacraft()
        .arg("decode")
        .arg(&world)
        .arg("1000000")
        .arg("2")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::function(|err: &str| {
            err.matches("blank/corrupted").count() == 1
        }));
    assert_eq!(std::fs::read(&out).unwrap(), vec![0u8; 20000]);
}

#[test]
fn decode_without_metadata_keeps_padding() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("small.bin");
    std::fs::write(&input, [9u8; 10]).unwrap();
    datacraft().arg("encode").arg(&input).arg(&world).assert().success();
    std::fs::remove_file(world.join("data/mapstore_meta_1000000.txt")).unwrap();

    let out = temp.path().join("small.out");
    datacraft()
        .arg("decode")
        .arg(&world)
        .arg("1000000")
        .arg("1")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("no metadata found"));
    assert_eq!(std::fs::read(&out).unwrap().len(), 16384);
}

#[test]
fn missing_map_fails_and_writes_nothing() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("a.bin");
    std::fs::write(&input, [1u8; 100]).unwrap();
    datacraft().arg("encode").arg(&input).arg(&world).assert().success();

    let out = temp.path().join("a.out");
    datacraft()
        .arg("decode")
        .arg(&world)
        .arg("1000000")
        .arg("2")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Map not found: map_1000001.dat"));
    assert!(!out.exists());
}

#[test]
fn missing_input_and_world_exit_one() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());

    datacraft()
        .arg("encode")
        .arg(temp.path().join("nope.bin"))
        .arg(&world)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
    assert!(!world.join("data").exists());

    datacraft()
        .arg("encode")
        .arg(temp.path().join("nope.bin"))
        .arg(temp.path().join("NoWorld"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));

    let input = temp.path().join("a.bin");
    std::fs::write(&input, [1u8; 4]).unwrap();
    datacraft()
        .arg("encode")
        .arg(&input)
        .arg(temp.path().join("NoWorld"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("World not found"));
}

#[test]
fn size_limit_and_collision_flags() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("a.bin");
    std::fs::write(&input, [1u8; 100]).unwrap();

    datacraft()
        .arg("encode")
        .arg(&input)
        .arg(&world)
        .args(["--max-size", "50"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("limit is 50 bytes"));

    datacraft().arg("encode").arg(&input).arg(&world).assert().success();
    datacraft()
        .arg("encode")
        .arg(&input)
        .arg(&world)
        .arg("--check-collisions")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("map id 1000000 is already taken"));
}

#[test]
fn dry_run_leaves_world_untouched() {
    let temp = tempdir().unwrap();
    let world = world(temp.path());
    let input = temp.path().join("a.bin");
    std::fs::write(&input, [1u8; 100]).unwrap();

    datacraft()
        .arg("encode")
        .arg(&input)
        .arg(&world)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));
    assert!(!world.join("data").exists());

    datacraft()
        .arg("encode")
        .arg(&input)
        .arg(temp.path().join("NoWorld"))
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("World not found"));
}
