//! Test CLI commands
#[cfg(test)]
use serial_test::serial;

#[cfg(test)]
#[serial]
mod test_cli {
    use std::{fs, process::Command};

    #[test]
    fn test_help() {
        let output = Command::new("cargo")
            .arg("run")
            .arg("--")
            .arg("--help")
            .output()
            .unwrap_or_else(|err| panic!("Failed to execute: {err}"));

        assert!(
            output.status.success(),
            "Failed to execute command: stdout: {}; stderr: {}",
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap()
        );
    }

    #[test]
    fn test_cli_export_order_demo() {
        let output = Command::new("cargo")
            .arg("run")
            .arg("--")
            .arg("export")
            .arg("./tests/resources/order_demo.json")
            .arg("--output-dir")
            .arg("./target/test_export")
            .output()
            .unwrap_or_else(|err| panic!("Failed to execute: {err}"));

        assert!(
            output.status.success(),
            "Failed to execute command: stdout: {}; stderr: {}",
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap()
        );

        let ltlf = fs::read_to_string("./target/test_export/order_demo.ltlf").unwrap();
        assert_eq!(
            ltlf,
            "G ((!ship W regaddr) && (F open -> F regaddr) && G (pay -> X G !pay)) \
             -> G (G (reqc -> G !pay) && G (reqc -> F (cancel || refund)) && \
             !(F cancel && F refund) && ((!ship W pay) && (F pay -> F ship)))"
        );

        let tlsf = fs::read_to_string("./target/test_export/order_demo.tlsf").unwrap();
        assert!(tlsf.starts_with("INFO {"));
        assert!(tlsf.contains("TITLE:       \"coDECLARE contract (order_demo)\""));
        assert!(tlsf.contains("    regaddr;\n"));
        assert!(tlsf.contains("    skip;\n"));
        assert!(tlsf.contains("GUARANTEE {"));

        assert!(fs::remove_dir_all("./target/test_export").is_ok());
    }

    #[test]
    fn test_cli_export_custom_title() {
        let output = Command::new("cargo")
            .arg("run")
            .arg("--")
            .arg("export")
            .arg("./tests/resources/order_demo.json")
            .arg("--output-dir")
            .arg("./target/test_export_title")
            .arg("--title")
            .arg("order fulfilment")
            .output()
            .unwrap_or_else(|err| panic!("Failed to execute: {err}"));

        assert!(
            output.status.success(),
            "Failed to execute command: stdout: {}; stderr: {}",
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap()
        );

        let tlsf = fs::read_to_string("./target/test_export_title/order_demo.tlsf").unwrap();
        assert!(tlsf.contains("TITLE:       \"order fulfilment\""));

        assert!(fs::remove_dir_all("./target/test_export_title").is_ok());
    }

    #[test]
    fn test_cli_export_debug() {
        let output = Command::new("cargo")
            .arg("run")
            .arg("--")
            .arg("--debug")
            .arg("export")
            .arg("./tests/resources/order_demo.json")
            .arg("--output-dir")
            .arg("./target/test_export_debug")
            .output()
            .unwrap_or_else(|err| panic!("Failed to execute: {err}"));

        assert!(
            output.status.success(),
            "Failed to execute command: stdout: {}; stderr: {}",
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap()
        );
        assert!(fs::remove_dir_all("./target/test_export_debug").is_ok());
    }

    #[test]
    fn test_cli_export_rejects_dangling_reference() {
        // the guarantee references an activity the model never declares
        let output = Command::new("cargo")
            .arg("run")
            .arg("--")
            .arg("export")
            .arg("./tests/resources/broken_model.json")
            .arg("--output-dir")
            .arg("./target/test_export_broken")
            .output()
            .unwrap_or_else(|err| panic!("Failed to execute: {err}"));

        assert!(
            !output.status.success(),
            "Expected the command to fail: stdout: {}",
            String::from_utf8(output.stdout).unwrap(),
        );

        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(
            stderr.contains("refund"),
            "Expected the undeclared activity in the error output, got: {stderr}"
        );
    }

    #[test]
    fn test_cli_missing_input_file() {
        let output = Command::new("cargo")
            .arg("run")
            .arg("--")
            .arg("export")
            .arg("./tests/resources/does_not_exist.json")
            .output()
            .unwrap_or_else(|err| panic!("Failed to execute: {err}"));

        assert!(
            !output.status.success(),
            "Expected the command to fail: stdout: {}",
            String::from_utf8(output.stdout).unwrap(),
        );
    }
}
