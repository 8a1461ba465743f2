use std::env;
use std::io;
use std::path::{Path, PathBuf};

use nix::libc;

use super::prelude::*;

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = super::CD_NAME;

    const HELP: &'static str = "\
cd: cd [dir]
    Change the current working directory to DIR. With no argument, change
    to the home directory.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if args.len() > 1 {
            return Err(Error::builtin_command(
                format!("cd: takes at most one argument ({} given)", args.len()),
                2,
            ));
        }

        let dir = match args.first() {
            Some(path) => PathBuf::from(path.as_ref()),
            None => shell
                .home_dir()
                .map(Path::to_path_buf)
                .ok_or_else(|| Error::builtin_command("cd: HOME not set", 1))?,
        };

        if let Err(e) = env::set_current_dir(&dir) {
            let message = if e.kind() == io::ErrorKind::NotFound {
                format!("cd: {}: no such file or directory", dir.display())
            } else if e.raw_os_error() == Some(libc::ENOTDIR) {
                format!("cd: {}: not a directory", dir.display())
            } else {
                format!("cd: {}: {}", dir.display(), e)
            };
            return Err(Error::builtin_command(message, 1));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::REAP_LOCK;
    use crate::shell::ShellConfig;

    fn run_cd(shell: &mut Shell, args: &[&str]) -> Result<()> {
        Cd::run(shell, args, &mut Vec::<u8>::new())
    }

    #[test]
    fn changes_to_the_given_directory() {
        let _guard = REAP_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let original = env::current_dir().unwrap();
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();

        run_cd(&mut shell, &[dir.path().to_str().unwrap()]).unwrap();
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn with_no_argument_changes_to_home() {
        let _guard = REAP_LOCK.lock().unwrap();
        let original = env::current_dir().unwrap();
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();
        let home = shell.home_dir().unwrap().to_path_buf();

        run_cd(&mut shell, &[]).unwrap();
        assert_eq!(env::current_dir().unwrap(), home);

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn a_missing_path_leaves_the_directory_unchanged() {
        let _guard = REAP_LOCK.lock().unwrap();
        let original = env::current_dir().unwrap();
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();

        let err = run_cd(&mut shell, &["definitely-not-a-directory"]).unwrap_err();
        assert!(err.to_string().contains("no such file or directory"));
        assert_eq!(env::current_dir().unwrap(), original);
    }

    #[test]
    fn a_file_path_is_not_a_directory() {
        let _guard = REAP_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "data").unwrap();
        let original = env::current_dir().unwrap();
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();

        let err = run_cd(&mut shell, &[file.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        assert_eq!(env::current_dir().unwrap(), original);
    }

    #[test]
    fn too_many_arguments_is_a_usage_error() {
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();
        let err = run_cd(&mut shell, &["a", "b"]).unwrap_err();
        assert!(err.to_string().contains("takes at most one argument"));
    }
}
