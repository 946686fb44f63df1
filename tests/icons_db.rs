mod common;

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use common::{read_pack, write_module, write_pack, StubGenerator};
use pack_icons::manifest::read_module_id;
use pack_icons::runner::{run_icons, IconJob};
use pack_icons::utils::naming::short_hash;
use pack_icons::{AppError, ImageSize};

async fn job(root: &Path) -> IconJob {
    IconJob {
        module_root: root.to_path_buf(),
        module_id: read_module_id(&root.join("module.json")).await.unwrap(),
        packs_dir: root.join("packs"),
        limit: None,
        overwrite: false,
        dry_run: false,
        size: ImageSize::square(512),
    }
}

fn acid_splash_file() -> String {
    format!("acid-splash-{}.png", short_hash("Acid Splash"))
}

#[tokio::test]
async fn generates_icon_and_rewrites_line_pack() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "spells.db", "{\"name\":\"Acid Splash\",\"type\":\"spell\"}\n");

    let stub = StubGenerator::new(&[0x2a]);
    let summary = run_icons(&job(root).await, &stub).await.unwrap();

    assert_eq!(stub.calls(), 1);
    assert_eq!(summary.generated, 1);
    assert_eq!(summary.files_rewritten, 1);

    let file = acid_splash_file();
    let icon = root.join("icons/generated/spells").join(&file);
    assert_eq!(fs::read(&icon).unwrap(), vec![0x2a]);
    assert_eq!(
        read_pack(root, "spells.db"),
        format!(
            "{{\"name\":\"Acid Splash\",\"type\":\"spell\",\"img\":\"modules/arcane-codex/icons/generated/spells/{}\"}}\n",
            file
        )
    );
    assert!(stub.prompts()[0].contains("Acid Splash"));
}

#[tokio::test]
async fn rerun_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "spells.db", "{\"name\":\"Acid Splash\",\"type\":\"spell\"}\n");
    run_icons(&job(root).await, &StubGenerator::new(&[1])).await.unwrap();
    let after_first = read_pack(root, "spells.db");

    let stub = StubGenerator::new(&[2]);
    let summary = run_icons(&job(root).await, &stub).await.unwrap();

    assert_eq!(stub.calls(), 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.files_rewritten, 0);
    assert_eq!(read_pack(root, "spells.db"), after_first);
    let icon = root.join("icons/generated/spells").join(acid_splash_file());
    assert_eq!(fs::read(icon).unwrap(), vec![1]);
}

#[tokio::test]
async fn missing_icon_file_is_regenerated() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "spells.db", "{\"name\":\"Acid Splash\",\"type\":\"spell\"}\n");
    run_icons(&job(root).await, &StubGenerator::new(&[1])).await.unwrap();
    fs::remove_file(root.join("icons/generated/spells").join(acid_splash_file())).unwrap();

    let stub = StubGenerator::new(&[3]);
    run_icons(&job(root).await, &stub).await.unwrap();
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn overwrite_regenerates_existing_icons() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "spells.db", "{\"name\":\"Acid Splash\",\"type\":\"spell\"}\n");
    run_icons(&job(root).await, &StubGenerator::new(&[1])).await.unwrap();

    let mut j = job(root).await;
    j.overwrite = true;
    let stub = StubGenerator::new(&[9]);
    run_icons(&j, &stub).await.unwrap();
    assert_eq!(stub.calls(), 1);
    let icon = root.join("icons/generated/spells").join(acid_splash_file());
    assert_eq!(fs::read(icon).unwrap(), vec![9]);
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    let spells = "{\"name\":\"Acid Splash\",\"type\":\"spell\"}\n{\"name\":\"Light\",\"type\":\"spell\"}\n";
    let items = "[{\"name\":\"Boots of Speed\"}]";
    write_pack(root, "spells.db", spells);
    write_pack(root, "items.json", items);

    let mut j = job(root).await;
    j.dry_run = true;
    let stub = StubGenerator::new(&[1]);
    let summary = run_icons(&j, &stub).await.unwrap();

    assert_eq!(stub.calls(), 0);
    assert_eq!(summary.planned, 3);
    assert_eq!(summary.files_rewritten, 0);
    assert!(!root.join("icons").exists());
    assert_eq!(read_pack(root, "spells.db"), spells);
    assert_eq!(read_pack(root, "items.json"), items);
}

#[tokio::test]
async fn array_pack_keeps_array_format_and_item_dir() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "items.json", "[{\"_id\":\"w1\",\"name\":\"Weapon of the Adept\",\"img\":\"icons/svg/item-bag.svg\"},\"note\"]");

    let stub = StubGenerator::new(&[7]);
    run_icons(&job(root).await, &stub).await.unwrap();

    assert!(stub.prompts()[0].contains("single weapon on parchment background, Weapon of the Adept"));
    let file = format!("weapon-of-the-adept-{}.png", short_hash("w1"));
    assert!(root.join("icons/generated/items").join(&file).exists());
    assert_eq!(
        read_pack(root, "items.json"),
        format!(
            "[{{\"_id\":\"w1\",\"name\":\"Weapon of the Adept\",\"img\":\"modules/arcane-codex/icons/generated/items/{}\"}},\"note\"]\n",
            file
        )
    );
}

#[tokio::test]
async fn limit_stops_across_files_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "b-spells.db", "{\"name\":\"Light\",\"type\":\"spell\"}\n");
    write_pack(
        root,
        "a-items.db",
        "{\"name\":\"Rope\"}\n{\"name\":\"Ring of Protection\"}\n{\"name\":\"Torch\"}\n",
    );

    let mut j = job(root).await;
    j.limit = Some(2);
    let stub = StubGenerator::new(&[1]);
    let summary = run_icons(&j, &stub).await.unwrap();

    assert_eq!(stub.calls(), 2);
    assert_eq!(summary.files_seen, 1);
    assert_eq!(summary.files_rewritten, 1);
    let prompts = stub.prompts();
    assert!(prompts[0].contains("Rope"));
    assert!(prompts[1].contains("single ring on parchment background"));
    assert!(!read_pack(root, "a-items.db").contains("Torch\",\"img\""));
    assert_eq!(read_pack(root, "b-spells.db"), "{\"name\":\"Light\",\"type\":\"spell\"}\n");
}

#[tokio::test]
async fn upstream_failure_aborts_and_keeps_earlier_files() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "a.db", "{\"name\":\"Rope\"}\n");
    write_pack(root, "b.db", "{\"name\":\"Torch\"}\n");

    let stub = StubGenerator::failing_on(2);
    let err = run_icons(&job(root).await, &stub).await.unwrap_err();

    assert!(matches!(err, AppError::Upstream { status: 503, .. }));
    assert!(read_pack(root, "a.db").contains("\"img\":\"modules/arcane-codex/icons/generated/items/rope-"));
    assert_eq!(read_pack(root, "b.db"), "{\"name\":\"Torch\"}\n");
}

#[tokio::test]
async fn malformed_pack_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_module(root, "arcane-codex");
    write_pack(root, "spells.db", "{\"name\":\"Light\"}\n{broken\n");

    let stub = StubGenerator::new(&[1]);
    match run_icons(&job(root).await, &stub).await {
        Err(AppError::Parse { file, line, .. }) => {
            assert!(file.ends_with("spells.db"));
            assert_eq!(line, 2);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
    assert_eq!(stub.calls(), 0);
}
