#![allow(dead_code)]

use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::fixture;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const ARGS_LOG: &str = "args.log";
pub const STDIN_LOG: &str = "stdin.log";

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Writes a stand-in `p4` shell script answering sub-commands with canned output
///
/// The script records its arguments (one per line) in `args.log` and its
/// stdin in `stdin.log`, both next to itself.
pub struct FakeP4 {
    dir: PathBuf,
    arms: Vec<(String, String)>,
}

impl FakeP4 {
    pub fn new(dir: &Path) -> Self {
        FakeP4 {
            dir: dir.to_path_buf(),
            arms: Vec::new(),
        }
    }

    /// Answer `command` by running `body` as shell
    pub fn on(mut self, command: &str, body: &str) -> Self {
        self.arms.push((command.to_string(), body.to_string()));
        self
    }

    /// Answer `command` with these stdout lines and exit code
    pub fn lines(self, command: &str, lines: &[&str], exit_code: i32) -> Self {
        let body = format!("cat <<'P4OUT'\n{}\nP4OUT\nexit {exit_code}", lines.join("\n"));
        self.on(command, &body)
    }

    /// Answer `command` with raw bytes on stdout
    pub fn bytes(self, command: &str, bytes: &[u8]) -> Self {
        let file = self.dir.join(format!("{command}.bin"));
        std::fs::write(&file, bytes).expect("Failed to write canned output");
        let body = format!("cat '{}'", file.display());
        self.on(command, &body)
    }

    pub fn install(self) -> PathBuf {
        let dir = self.dir.display();
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!("printf '%s\\n' \"$@\" > '{dir}/{ARGS_LOG}'\n"));
        script.push_str(&format!("cat > '{dir}/{STDIN_LOG}'\n"));
        script.push_str(
            "skip=0\n\
             cmd=''\n\
             for arg in \"$@\"; do\n\
             if [ \"$skip\" = 1 ]; then skip=0; continue; fi\n\
             case \"$arg\" in\n\
             -x) skip=1 ;;\n\
             -*) ;;\n\
             *) cmd=\"$arg\"; break ;;\n\
             esac\n\
             done\n\
             case \"$cmd\" in\n",
        );
        for (command, body) in &self.arms {
            script.push_str(&format!("{command})\n{body}\n;;\n"));
        }
        script.push_str("*)\necho \"error: unexpected command $cmd\"\nexit 1\n;;\nesac\n");

        let path = self.dir.join("p4");
        std::fs::write(&path, script).expect("Failed to write fake p4");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake p4 executable");
        path
    }
}

/// Arguments of the last fake `p4` run
pub fn recorded_args(dir: &TempDir) -> Vec<String> {
    std::fs::read_to_string(dir.child(ARGS_LOG).path())
        .expect("fake p4 did not run")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn recorded_stdin(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.child(STDIN_LOG).path()).unwrap_or_default()
}
