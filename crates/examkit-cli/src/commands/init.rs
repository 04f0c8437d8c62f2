//! The `examkit init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("examkit.toml"), SAMPLE_CONFIG)?;
    write_if_absent(Path::new("que_and_options.txt"), SAMPLE_QUESTIONS)?;
    write_if_absent(Path::new("key.txt"), SAMPLE_KEY)?;

    std::fs::create_dir_all("assets")?;
    write_if_absent(Path::new("assets/roster.csv"), SAMPLE_ROSTER)?;

    println!("\nNext steps:");
    println!("  1. Add participants to assets/roster.csv");
    println!("  2. Run: examkit validate");
    println!("  3. Run: examkit run");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examkit configuration

question_file = "que_and_options.txt"
key_file = "key.txt"
roster_file = "assets/roster.csv"
# report_dir = "reports"

[columns]
email = "Email"
roll_no = "Roll No"
marks = "Marks"
"#;

const SAMPLE_QUESTIONS: &str = "\
What is the capital of France?
Berlin
Paris
Madrid
Rome

Which planet is known as the red planet?
Venus
Mars
Jupiter
Saturn

What is 7 x 8?
54
56
58
64
";

const SAMPLE_KEY: &str = "2\n2\n2\n";

const SAMPLE_ROSTER: &str = "\
Name,Email,Roll No,Marks
Ann Example,ann@example.com,R001,
";
