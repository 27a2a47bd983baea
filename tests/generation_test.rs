use small_xword::adapters::export::CrosswordExport;
use small_xword::core::render::to_text;
use small_xword::domain::ports::{Pipeline, WordSource};
use small_xword::utils::validation::Validate;
use small_xword::{
    CliConfig, Crossword, CrosswordPipeline, Direction, LocalStorage, TomlConfig, TsvWordSource, Word,
    XwordEngine, XwordError,
};
use std::collections::HashSet;
use std::io::Write;
use tempfile::TempDir;

const ANIMALS: &str = "\
# word\thint\toptional
cat\tSmall feline
car\tHas four wheels
art\tPainting, sculpture\tB
dog\tBarks
cow\tMoos\tO
owl\tHoots at night\tExtra
";

fn write_word_list(dir: &TempDir, contents: &str) -> anyhow::Result<String> {
    let path = dir.path().join("words.tsv");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path.to_string_lossy().into_owned())
}

fn cli_config(words: String, output_path: String, seed: u64) -> CliConfig {
    CliConfig {
        words,
        output_path,
        name: "Animals".to_string(),
        seed: Some(seed),
        formats: vec!["text".to_string(), "json".to_string()],
        delimiter: '\t',
        has_headers: false,
        keep_order: false,
        no_solution: false,
        verbose: false,
        log_json: false,
    }
}

fn solution_of(words: &[(&str, bool)], seed: u64) -> anyhow::Result<String> {
    let mut crossword = Crossword::with_seed(seed);
    for (text, required) in words {
        crossword.submit(Word::new(text, text, *required)?)?;
    }
    crossword.finalize();
    Ok(to_text(&crossword.renderer().solution()))
}

#[test]
fn test_end_to_end_generation_from_tsv() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let words = write_word_list(&dir, ANIMALS)?;
    let output = dir.path().join("out").to_string_lossy().into_owned();

    let config = cli_config(words.clone(), output.clone(), 7);
    config.validate()?;

    let source = TsvWordSource::new(&words);
    let engine = XwordEngine::new(CrosswordPipeline::new(source, LocalStorage::new(output.clone()), config));
    let report = engine.run()?;

    assert_eq!(report.seed, 7);
    assert_eq!(report.placed + report.unplaced.len(), 6);
    assert!(report.rejected.is_empty());
    assert_eq!(report.outputs.len(), 2);

    let text = std::fs::read_to_string(std::path::Path::new(&output).join("crossword.txt"))?;
    assert!(text.starts_with("Animals"));
    assert!(text.contains("Small feline"));
    assert!(text.contains("Puzzle:"));

    let json = std::fs::read_to_string(std::path::Path::new(&output).join("crossword.json"))?;
    let export: CrosswordExport = serde_json::from_str(&json)?;
    assert_eq!(export.name, "Animals");
    assert_eq!(export.seed, 7);
    assert_eq!(export.words.len(), report.placed);
    assert_eq!((export.rows, export.cols), (report.rows, report.cols));

    // 每個已放置字詞都必須能從格子中讀回
    for word in &export.words {
        let (dr, dc) = match word.direction {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        };
        let read: String = (0..word.text.len() as i32)
            .map(|i| {
                let row = &export.grid[(word.row + dr * i) as usize];
                row.chars().nth((word.col + dc * i) as usize).unwrap_or(' ')
            })
            .collect();
        assert_eq!(read, word.text);
    }

    Ok(())
}

#[test]
fn test_same_seed_reproduces_the_layout() -> anyhow::Result<()> {
    let words = [("cat", true), ("car", true), ("art", false), ("tar", false), ("rat", true)];

    for seed in [1, 17, 4242] {
        assert_eq!(solution_of(&words, seed)?, solution_of(&words, seed)?);
    }
    Ok(())
}

#[test]
fn test_cat_car_art_always_connect() -> anyhow::Result<()> {
    for seed in 0..20 {
        let mut crossword = Crossword::with_seed(seed);
        crossword.submit(Word::new("CAT", "feline", true)?)?;
        crossword.submit(Word::new("CAR", "vehicle", true)?)?;
        crossword.submit(Word::new("ART", "painting", false)?)?;
        crossword.finalize();

        assert_eq!(crossword.placed_words().len(), 3);
        assert!(crossword.missing_mandatory_words().is_empty());

        let cat = crossword.word("CAT").ok_or_else(|| anyhow::anyhow!("CAT missing"))?;
        let car = crossword.word("CAR").ok_or_else(|| anyhow::anyhow!("CAR missing"))?;
        // CAR 一定與 CAT 交叉，方向必然不同
        let cat_cells: HashSet<_> = cat.positions().into_iter().collect();
        assert!(car.positions().iter().any(|p| cat_cells.contains(p)));
        assert_ne!(cat.direction(), car.direction());
    }
    Ok(())
}

#[test]
fn test_single_word_gets_number_one() -> anyhow::Result<()> {
    let mut crossword = Crossword::with_seed(3);
    crossword.submit(Word::new("OK", "fine", true)?)?;
    crossword.finalize();

    let word = crossword.word("OK").ok_or_else(|| anyhow::anyhow!("OK missing"))?;
    assert_eq!(word.number(), 1);
    assert_eq!(word.start().map(|b| b.anchor.row), Some(0));
    assert_eq!(word.start().map(|b| b.anchor.col), Some(0));

    let renderer = crossword.renderer();
    let hints: Vec<String> = Direction::ALL.iter().flat_map(|d| renderer.hints(*d)).collect();
    assert_eq!(hints, vec!["1. fine".to_string()]);
    Ok(())
}

#[test]
fn test_word_rules() {
    assert!(matches!(Word::new("A", "", true), Err(XwordError::WordTooShort { .. })));
    assert!(matches!(Word::new("NO-GO", "", true), Err(XwordError::InvalidCharacter { .. })));

    let a = Word::new("cat", "feline", true).unwrap();
    let b = Word::new("CAT", "kitty", false).unwrap();
    assert_eq!(a, b);

    let set: HashSet<Word> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_isolated_word_placed_and_invalid_required_word_aborts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    // XYZ 與 CAT 沒有共同字母，但會以孤立方式擺放，所以仍應成功
    let words = write_word_list(&dir, "cat\tfeline\nxyz\tletters\n")?;
    let output = dir.path().join("out").to_string_lossy().into_owned();

    let pipeline = CrosswordPipeline::new(
        TsvWordSource::new(&words),
        LocalStorage::new(output.clone()),
        cli_config(words.clone(), output, 11),
    );
    let outcome = pipeline.build(pipeline.extract()?)?;
    assert_eq!(outcome.crossword.placed_words().len(), 2);
    assert_eq!(outcome.isolated, 1);

    let broken = write_word_list(&dir, "cat\tfeline\nq\ttoo short\n")?;
    let pipeline = CrosswordPipeline::new(
        TsvWordSource::new(&broken),
        LocalStorage::new(dir.path().to_string_lossy().into_owned()),
        cli_config(broken.clone(), "out".to_string(), 11),
    );
    let err = pipeline.build(pipeline.extract()?).unwrap_err();
    assert!(matches!(err, XwordError::WordTooShort { .. }));
    // 中止的執行不可回傳 0
    assert_eq!(err.exit_code(), 1);
    Ok(())
}

#[test]
fn test_toml_driven_run() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let words = write_word_list(&dir, "word,hint,optional\nsun,Star,\nmoon,Satellite,B\n")?;
    let output = dir.path().join("toml-out").to_string_lossy().into_owned();

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[puzzle]
name = "Sky"
seed = 5

[input]
path = "{words}"
delimiter = ","
has_headers = true

[output]
path = "{output}"
formats = ["json"]
"#
    ))?;
    config.validate()?;

    let source = TsvWordSource::new(config.words_path()?.as_str())
        .with_delimiter(config.delimiter()?)
        .with_headers(config.has_headers());
    let entries = source.read_entries()?;
    assert_eq!(entries.len(), 2);
    assert!(entries[0].required);
    assert!(!entries[1].required);

    let report = XwordEngine::new(CrosswordPipeline::new(source, LocalStorage::new(output), config)).run()?;
    assert_eq!(report.seed, 5);
    assert_eq!(report.outputs.len(), 1);
    assert!(report.outputs[0].ends_with("crossword.json"));
    Ok(())
}
