use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn wallpic() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wallpic"))
}

/// Temp library + catalog with a config mapping Cars to id 9
struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("library");
        fs::create_dir_all(&root).unwrap();

        let config = format!(
            "[library]\nroot = '{}'\n\n[catalog]\ndatabase = '{}'\n\n\
             [[categories]]\nname = \"Cars\"\nid = 9\n\
             description = \"Supercars and classics\"\ndisplay_order = 5\n\n\
             [[categories]]\nname = \"Nature\"\nid = 3\n",
            root.display(),
            dir.path().join("catalog.sqlite3").display()
        );
        fs::write(dir.path().join("config.toml"), config).unwrap();

        Self { dir }
    }

    fn root(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("catalog.sqlite3")
    }

    fn run(&self, args: &[&str]) -> Output {
        wallpic()
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .args(args)
            .env("RUST_LOG", "wallpic=info")
            .output()
            .expect("failed to run")
    }
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    img.save(path).unwrap();
}

#[test]
fn test_help_exits_zero() {
    let output = wallpic().arg("--help").output().expect("failed to run");
    assert!(output.status.success(), "wallpic --help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("gallery catalog"),
        "help should contain description"
    );
}

#[test]
fn test_version_exits_zero() {
    let output = wallpic().arg("--version").output().expect("failed to run");
    assert!(output.status.success(), "wallpic --version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("wallpic"),
        "version output should contain crate name"
    );
}

#[test]
fn test_sync_and_list_categories() {
    let fx = Fixture::new();

    let output = fx.run(&["category", "sync"]);
    assert!(output.status.success());

    let output = fx.run(&["category", "list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cars"));
    assert!(stdout.contains("Nature"));
    assert!(stdout.contains("Supercars and classics"));

    let conn = rusqlite::Connection::open(fx.db()).unwrap();
    let orders: Vec<(String, i64)> = conn
        .prepare("SELECT name, display_order FROM categories ORDER BY id")
        .unwrap()
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    // Nature has no display_order, so it takes its position times ten
    assert_eq!(orders, vec![("Nature".to_string(), 20), ("Cars".to_string(), 5)]);
}

#[test]
fn test_import_organized_category() {
    let fx = Fixture::new();
    let wallpapers = fx.root().join("Cars").join("Wallpapers");
    let thumbnails = fx.root().join("Cars").join("Thumbnails");
    fs::create_dir_all(&wallpapers).unwrap();
    fs::create_dir_all(&thumbnails).unwrap();
    write_png(&wallpapers.join("2023_Ford_Mustang_GT_wallpaper.png"), 320, 180);
    write_png(&wallpapers.join("tokyo_night.png"), 90, 160);
    write_png(&thumbnails.join("2023_Ford_Mustang_GT_wallpaper.png"), 64, 36);

    assert!(fx.run(&["category", "sync"]).status.success());
    let output = fx.run(&["import", "Cars"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wallpapers added: 2"), "stdout: {}", stdout);

    let conn = rusqlite::Connection::open(fx.db()).unwrap();
    let (title, match_type): (String, String) = conn
        .query_row(
            "SELECT title, match_type FROM desktop_wallpapers WHERE category_id = 9",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(title, "2023 Ford Mustang GT");
    assert_eq!(match_type, "exact");

    let (desktop, mobile): (i64, i64) = conn
        .query_row(
            "SELECT desktop_wallpaper_count, mobile_wallpaper_count FROM categories WHERE id = 9",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!((desktop, mobile), (1, 1));
}

#[test]
fn test_import_missing_folder_does_not_panic() {
    let fx = Fixture::new();
    assert!(fx.run(&["category", "sync"]).status.success());

    let output = fx.run(&["import", "Nature"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "should not panic: {}", stderr);
    assert!(output.status.success());
    assert!(stderr.contains("No folder for 'Nature'"));
}

#[test]
fn test_scan_does_not_create_catalog() {
    let fx = Fixture::new();
    let folder = fx.root().join("nature");
    fs::create_dir_all(&folder).unwrap();
    write_png(&folder.join("forest_lake.png"), 200, 100);
    write_png(&folder.join("forest_lake_small.png"), 20, 10);

    let output = fx.run(&["scan", "Nature"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Forest Lake"), "stdout: {}", stdout);
    assert!(stdout.contains("size_based"));
    assert!(!fx.db().exists());
}

#[test]
fn test_scan_unknown_category_exits_zero() {
    let fx = Fixture::new();
    let output = fx.run(&["scan", "Nowhere"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("Category 'Nowhere' not found"));
}

#[test]
fn test_export_urls_after_import() {
    let fx = Fixture::new();
    let folder = fx.root().join("Cars");
    fs::create_dir_all(&folder).unwrap();
    write_png(&folder.join("ford_bronco.png"), 320, 180);

    assert!(fx.run(&["category", "sync"]).status.success());
    assert!(fx.run(&["import", "Cars"]).status.success());

    let out = fx.dir.path().join("exports");
    let output = fx.run(&["export-urls", "--out-dir", out.to_str().unwrap()]);
    assert!(output.status.success());

    let mut lists: Vec<PathBuf> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    lists.sort();
    assert_eq!(lists.len(), 2);

    let name = |p: &PathBuf| p.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name(&lists[0]).starts_with("all_image_urls_"));
    assert!(name(&lists[1]).starts_with("all_thumbnail_urls_"));

    let images = fs::read_to_string(&lists[0]).unwrap();
    assert_eq!(images.lines().count(), 1);
    assert!(images.contains("/wallpapers/9/cat09_wp001_"));
    let thumbnails = fs::read_to_string(&lists[1]).unwrap();
    assert!(thumbnails.contains("/thumbnails/9/cat09_thumb001_"));
}

#[test]
fn test_config_prints_path() {
    let fx = Fixture::new();
    let output = fx.run(&["config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config.toml"));
    assert!(stdout.contains("[matching]"));
}
