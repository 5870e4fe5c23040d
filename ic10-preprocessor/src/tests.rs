#[cfg(test)]
mod tests {
    use super::super::*;
    use ic10_common::{DirectiveFault, SourceLocation};
    use indoc::indoc;

    fn compile(input: &str) -> TransformResult<String> {
        Preprocessor::new().compile(input)
    }

    fn minify(input: &str) -> TransformResult<String> {
        Preprocessor::new().minify(input)
    }

    #[test]
    fn test_compile_define() {
        assert_eq!(compile("define LEN 10\nmove r0 LEN\n").unwrap(), "move r0 10\n");
    }

    #[test]
    fn test_compile_alias_hash() {
        let output = compile("alias CHAN HASH(\"ItemKit\")\nbatch CHAN\n").unwrap();
        assert_eq!(output, format!("batch {}\n", hash("ItemKit")));
        assert_eq!(output, "batch 3679088650\n");
    }

    #[test]
    fn test_minify_strips_comment() {
        assert_eq!(minify("move r0 1 # set register\n").unwrap(), "move r0 1\n");
    }

    #[test]
    fn test_compile_keeps_comments_and_blank_lines() {
        let input = indoc! {"
            define LEN 10 # how many

            move r0 LEN # load
            loop:
            j loop
        "};
        let output = compile(input).unwrap();
        assert_eq!(output, "\nmove r0 10 # load\nloop:\nj loop\n");
    }

    #[test]
    fn test_compile_is_idempotent() {
        let input = indoc! {"
            define MAX 50
            alias pump d0
            # pump controller
            s pump On 1
            ble r0 MAX 3
        "};
        let once = compile(input).unwrap();
        let twice = compile(&once).unwrap();
        assert_eq!(once, twice);
        assert!(!once.contains("define"));
        assert!(!once.contains("alias"));
    }

    #[test]
    fn test_every_use_is_replaced() {
        let input = indoc! {"
            define TARGET 293.15
            l r0 d0 Temperature
            sub r1 r0 TARGET
            bgtz r1 2
            move r2 TARGET
        "};
        let output = compile(input).unwrap();
        assert!(!output.contains("TARGET"));
        assert_eq!(output.matches("293.15").count(), 2);
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_define_inside_alias_value() {
        let input = indoc! {"
            define SENSOR d1
            alias gauge SENSOR
            l r0 gauge Pressure
        "};
        assert_eq!(compile(input).unwrap(), "l r0 d1 Pressure\n");
    }

    #[test]
    fn test_minify_full_program() {
        let input = indoc! {"
            # Airlock controller
            alias door d0
            alias sensor d1
            define LIMIT 101.325 # kPa

            start:
              l r0 sensor Pressure   # read
              bgt r0 LIMIT open
              j start

            open:
              s door Open 1
              j start
        "};
        // The header comment starts the text, so it survives and is line 0
        let expected = indoc! {"
            # Airlock controller
              l r0 d1 Pressure
              bgt r0 101.325 4
              j 1
              s d0 Open 1
              j 1
        "};
        assert_eq!(minify(input).unwrap(), expected);
    }

    #[test]
    fn test_minify_label_with_hash_define() {
        let input = indoc! {"
            define FILTERS HASH(\"StructureFiltration\")
            main:
            lb r0 FILTERS On 0
            yield
            j main
        "};
        let expected = format!("lb r0 {} On 0\nyield\nj 0\n", hash("StructureFiltration"));
        assert_eq!(minify(input).unwrap(), expected);
    }

    #[test]
    fn test_minify_comment_inside_define_is_gone_before_substitution() {
        let input = "yield\ndefine X 5 # five\nmove r0 X\n";
        assert_eq!(minify(input).unwrap(), "yield\nmove r0 5\n");
    }

    #[test]
    fn test_minify_directive_that_was_only_a_comment() {
        // Stripping leaves `define X`, which has no value
        let err = minify("yield\ndefine X #5\n").unwrap_err();
        assert!(matches!(
            err,
            TransformError::MalformedDirective { reason: DirectiveFault::MissingValue, .. }
        ));
    }

    #[test]
    fn test_minify_keeps_crlf_endings() {
        assert_eq!(minify("a # x\r\nb\r\n").unwrap(), "a\r\nb\r\n");

        let input = "define LEN 3 # count\r\nloop:\r\nmove r0 LEN # load\r\n\r\nj loop\r\n";
        assert_eq!(minify(input).unwrap(), "move r0 3\r\nj 0\r\n");
    }

    #[test]
    fn test_signed_hashes() {
        let mut preprocessor = Preprocessor::new();
        preprocessor.set_hash_format(HashFormat::Signed);
        let output = preprocessor.compile("define KIT HASH(\"ItemKit\")\nmove r0 KIT\n").unwrap();
        assert_eq!(output, "move r0 -615878646\n");
    }

    #[test]
    fn test_substring_replacement_policy() {
        let input = "define ON 1\nmove r0 ON\ns d0 On ON\nmove r1 ONE\n";
        assert_eq!(compile(input).unwrap(), "move r0 1\ns d0 On 1\nmove r1 ONE\n");

        let mut preprocessor = Preprocessor::new();
        preprocessor.set_replacement(Replacement::Substring);
        assert_eq!(
            preprocessor.compile(input).unwrap(),
            "move r0 1\ns d0 On 1\nmove r1 1E\n"
        );
    }

    #[test]
    fn test_ignore_periods() {
        let input = "yield\n...\nj 0\n";
        assert_eq!(minify(input).unwrap(), input);

        let mut preprocessor = Preprocessor::new();
        preprocessor.set_ignore_periods(true);
        assert_eq!(preprocessor.minify(input).unwrap(), "yield\nj 0\n");
    }

    #[test]
    fn test_error_carries_filename() {
        let mut preprocessor = Preprocessor::new();
        preprocessor.set_filename("airlock.ic10");
        let err = preprocessor.compile("yield\nalias door\n").unwrap_err();
        assert_eq!(err.location(), Some(&SourceLocation::new("airlock.ic10", 2, 11)));
    }

    #[test]
    fn test_error_line_survives_earlier_removals() {
        let input = indoc! {"
            define A 1
            define B 2
            alias door d0
            alias
        "};
        let err = compile(input).unwrap_err();
        assert_eq!(err.location().map(|l| l.line), Some(4));
    }

    #[test]
    fn test_no_partial_output_on_error() {
        let input = "define A 1\nmove r0 A\ndefine B HASH(\"x\"\n";
        assert!(compile(input).is_err());
    }

    #[test]
    fn test_diagnostics() {
        let preprocessor = Preprocessor::new();
        let long_line = format!("move r0 {}", "9".repeat(60));
        let output = preprocessor.minify(&format!("{long_line}\n")).unwrap();
        let report = preprocessor.diagnostics(&output, Mode::Minify);
        assert_eq!(report.warning_count(), 1);

        let mut quiet = Preprocessor::new();
        quiet.set_check_limits(false);
        assert!(quiet.diagnostics(&output, Mode::Minify).is_empty());

        let mut named = Preprocessor::new();
        named.set_filename("long.ic10");
        assert_eq!(
            named.diagnostics(&output, Mode::Minify).diagnostics()[0].location.filename,
            "long.ic10"
        );
    }

    #[test]
    fn test_compiled_output_is_not_limit_checked() {
        let input = format!("# {}
yield
", "long comment ".repeat(10));
        let preprocessor = Preprocessor::new();
        let output = preprocessor.compile(&input).unwrap();
        assert!(preprocessor.diagnostics(&output, Mode::Compile).is_empty());
        assert_eq!(preprocessor.diagnostics(&output, Mode::Minify).warning_count(), 1);
    }

    #[test]
    fn test_error_renders_as_diagnostic() {
        let mut preprocessor = Preprocessor::new();
        preprocessor.set_filename("vent.ic10");
        let err = preprocessor.minify("a:
yield
a:
").unwrap_err();
        let rendered = Diagnostic::from(&err).to_string();
        assert!(rendered.starts_with("vent.ic10:3:1: error: Duplicate label `a`"), "{rendered}");
    }

    #[test]
    fn test_output_paths() {
        let source = std::path::Path::new("/scripts/airlock.ic10");
        assert_eq!(
            Mode::Compile.output_path(source),
            Some(std::path::PathBuf::from("/scripts/compiled_airlock.ic10"))
        );
        assert_eq!(
            Mode::Minify.output_path(std::path::Path::new("airlock.ic10")),
            Some(std::path::PathBuf::from("minified_airlock.ic10"))
        );
        assert_eq!(Mode::Minify.output_path(std::path::Path::new("/")), None);
    }

    #[test]
    fn test_process_matches_shortcuts() {
        let input = "define A 1\nloop:\nmove r0 A # x\nj loop\n";
        let preprocessor = Preprocessor::default();
        assert_eq!(preprocessor.process(input, Mode::Compile).unwrap(), compile(input).unwrap());
        assert_eq!(preprocessor.process(input, Mode::Minify).unwrap(), "move r0 1\nj 0\n");
    }
}
