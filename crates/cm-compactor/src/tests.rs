use crate::*;
use cm_core::{MinifyConfig, MinifyError, SourceUnit};
use cm_scan::{Current, Scanner};

fn header(text: &str) -> Header {
    let mut scanner = Scanner::for_text(text);
    scan_header(&mut scanner, "using")
}

fn minify_with(text: &str, config: MinifyConfig) -> String {
    let pipeline = MergePipeline::new(config);
    let (out, _) = pipeline
        .merge_to_string(&[SourceUnit::memory("a.cs", text)])
        .unwrap();
    out
}

fn minify(text: &str) -> String {
    minify_with(text, MinifyConfig::default())
}

fn minify_err(text: &str) -> MinifyError {
    MergePipeline::default()
        .merge_to_string(&[SourceUnit::memory("a.cs", text)])
        .unwrap_err()
}

// ========== Preamble: header scan ==========

#[test]
fn test_header_interleaved() {
    let mut scanner = Scanner::for_text("using System;\nusing System.IO;\n#define X\nclass A{}");
    let h = scan_header(&mut scanner, "using");
    assert_eq!(h.defines, vec!["X"]);
    assert_eq!(h.imports, vec!["System", "System.IO"]);
    scanner.try_skip_whitespace();
    assert_eq!(scanner.current(), Current::Char('c'));
}

#[test]
fn test_header_dotted_path_with_trivia() {
    let h = header("using  System . Collections /* x */ . Generic ;\nclass A{}");
    assert_eq!(h.imports, vec!["System.Collections.Generic"]);
}

#[test]
fn test_header_define_spacing_and_comment() {
    let h = header("# define  A // note\n#define B\nint x;");
    assert_eq!(h.defines, vec!["A", "B"]);
}

#[test]
fn test_header_define_at_end_of_input() {
    let h = header("#define ONLY");
    assert_eq!(h.defines, vec!["ONLY"]);
}

#[test]
fn test_header_leading_comments_skipped() {
    let h = header("// lead\n/* block */\nusing A;\nclass C{}");
    assert_eq!(h.imports, vec!["A"]);
}

#[test]
fn test_header_valued_define_stops() {
    let mut scanner = Scanner::for_text("#define N 10\nusing X;");
    let h = scan_header(&mut scanner, "using");
    assert!(h.is_empty());
    assert_eq!(scanner.current(), Current::Char('#'));
    assert_eq!(scanner.position(), 1);
}

#[test]
fn test_header_rewinds_partial_import() {
    let mut scanner = Scanner::for_text("using static System.Math;");
    let h = scan_header(&mut scanner, "using");
    assert!(h.is_empty());
    assert!(scanner.try_read_identifier());
    assert_eq!(scanner.capture(), "using");
}

#[test]
fn test_header_rejects_other_shapes() {
    assert!(header("using X = Y;").is_empty());
    assert!(header("usingX;").is_empty());
    assert!(header("#defineX\n").is_empty());
    assert!(header("#if DEBUG\n#define X\n#endif").is_empty());
    assert!(header("using A").is_empty());
}

#[test]
fn test_header_stops_at_doc_comment() {
    let h = header("using A;\n/// doc\nusing B;");
    assert_eq!(h.imports, vec!["A"]);
}

#[test]
fn test_header_skips_leading_doc_banner() {
    let h = header("/// banner\n/// more\nusing A;\nusing B;\nclass C{}");
    assert_eq!(h.imports, vec!["A", "B"]);
    assert_eq!(
        minify("/// banner\nusing A;\nclass C{}"),
        "using A;\nclass C{}\n"
    );
    assert!(header("/// banner\nclass C{}").is_empty());
}

#[test]
fn test_header_stops_at_unterminated_comment() {
    let h = header("using A;\n/* open");
    assert_eq!(h.imports, vec!["A"]);
}

#[test]
fn test_header_custom_keyword() {
    let mut scanner = Scanner::for_text("import java.util.List;\nclass A{}");
    let h = scan_header(&mut scanner, "import");
    assert_eq!(h.imports, vec!["java.util.List"]);
}

#[test]
fn test_header_empty_input() {
    assert!(header("").is_empty());
    assert!(header("  \n ").is_empty());
}

// ========== Preamble: table ==========

#[test]
fn test_table_dedup_keeps_first_order() {
    let mut table = PreambleTable::new();
    assert!(table.add_import("B"));
    assert!(table.add_import("A"));
    assert!(!table.add_import("B"));
    assert_eq!(table.imports(), &["B".to_string(), "A".to_string()]);
    assert!(table.defines().is_empty());
}

#[test]
fn test_table_merge_headers() {
    let mut table = PreambleTable::new();
    table.merge(&Header {
        defines: vec!["X".into()],
        imports: vec!["System".into()],
    });
    table.merge(&Header {
        defines: vec!["X".into(), "Y".into()],
        imports: vec!["System".into(), "System.IO".into()],
    });
    assert_eq!(table.defines().len(), 2);
    assert_eq!(table.imports().len(), 2);
}

#[test]
fn test_table_write() {
    let mut table = PreambleTable::new();
    assert!(table.is_empty());
    table.add_import("System");
    table.add_define("X");
    let mut out = Vec::new();
    let written = table.write_to(&mut out, "using").unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "#define X\nusing System;\n");
    assert_eq!(written, text.len());
}

// ========== Emitter: spacing ==========

#[test]
fn test_fusion_inserts_single_space() {
    assert_eq!(minify("int   x1 ;"), "int x1;\n");
    assert_eq!(minify("return\n\n  value"), "return value\n");
}

#[test]
fn test_no_space_around_punctuation() {
    assert_eq!(minify("a + b * ( c - 1 ) ;"), "a+b*(c-1);\n");
    assert_eq!(minify("if ( x == 1 ) { y = 2 ; }"), "if(x==1){y=2;}\n");
}

#[test]
fn test_numbers_keep_separation() {
    assert_eq!(minify("x = 0x1F + 10u ;"), "x=0x1F+10u;\n");
    assert_eq!(minify("case 1 : return 2 ;"), "case 1:return 2;\n");
    assert_eq!(minify("a = 1 . 5 ;"), "a=1.5;\n");
}

#[test]
fn test_slash_never_opens_comment() {
    let once = minify("int y = a / *p;\nint z = b - -c;");
    assert_eq!(once, "int y=a/ *p;int z=b- -c;\n");
    assert_eq!(minify(&once), once);
    assert_eq!(minify("x = a / /* c */ *p;"), "x=a/ *p;\n");
    assert_eq!(minify("x = a / /b/;"), "x=a/ /b/;\n");
}

#[test]
fn test_doubled_operators_stay_apart() {
    assert_eq!(minify("a - - b + + c"), "a- -b+ +c\n");
    assert_eq!(minify("x = a + ++i;"), "x=a+ ++i;\n");
    assert_eq!(minify("p = & &q; r = a | |b"), "p=& &q;r=a| |b\n");
    assert_eq!(minify("a -/**/- b"), "a- -b\n");
}

#[test]
fn test_unicode_identifier() {
    assert_eq!(minify("var h\u{e9}llo = 1;"), "var h\u{e9}llo=1;\n");
}

// ========== Emitter: comments ==========

#[test]
fn test_comments_dropped() {
    assert_eq!(minify("int/**/x;"), "int x;\n");
    assert_eq!(minify("a // trailing\nb"), "a b\n");
    assert_eq!(minify("x = 1 /* c */ ;"), "x=1;\n");
}

#[test]
fn test_doc_comment_own_line() {
    assert_eq!(
        minify("/// <summary>\nclass A { }"),
        "/// <summary>\nclass A{}\n"
    );
    assert_eq!(minify("int x; /// doc\nint y;"), "int x;\n/// doc\nint y;\n");
}

#[test]
fn test_doc_comment_stripped_by_config() {
    let config = MinifyConfig::default().with_doc_comments(false);
    assert_eq!(minify_with("int x; /// doc\nint y;", config), "int x;int y;\n");
}

#[test]
fn test_lone_slash_is_operator() {
    assert_eq!(minify("a / b"), "a/b\n");
    assert_eq!(minify("a /= 2"), "a/=2\n");
}

// ========== Emitter: literals ==========

#[test]
fn test_string_literals_verbatim() {
    assert_eq!(minify("s = \"a  b\" + 'c' ;"), "s=\"a  b\"+'c';\n");
    assert_eq!(minify("s = \"// not a comment\";"), "s=\"// not a comment\";\n");
}

#[test]
fn test_verbatim_string() {
    assert_eq!(minify("x = @\"a \"\"q\"\" b\";"), "x=@\"a \"\"q\"\" b\";\n");
}

#[test]
fn test_verbatim_identifier() {
    assert_eq!(minify("var @class = 1;"), "var@class=1;\n");
    assert_eq!(minify("@class x;"), "@class x;\n");
}

#[test]
fn test_interpolated_string() {
    assert_eq!(minify("x = $\"v: {y}\" ;"), "x=$\"v: {y}\";\n");
    assert_eq!(minify("a $ b"), "a$b\n");
}

// ========== Emitter: directives ==========

#[test]
fn test_directive_lines() {
    assert_eq!(
        minify("int a;\n#if DEBUG\nint b;\n#endif\n"),
        "int a;\n#if DEBUG\nint b;\n#endif\n"
    );
}

#[test]
fn test_directive_crlf() {
    assert_eq!(
        minify("int a;\r\n#if X\r\nint b;\r\n#endif\r\n"),
        "int a;\n#if X\nint b;\n#endif\n"
    );
}

#[test]
fn test_directive_continuation() {
    assert_eq!(
        minify("#define M(a) \\\n  (a + 1)\nint x;"),
        "#define M(a) \\\n  (a + 1)\nint x;\n"
    );
}

#[test]
fn test_valued_define_stays_in_body() {
    assert_eq!(minify("#define N 10\nint x;"), "#define N 10\nint x;\n");
}

// ========== Emitter: wrapping ==========

#[test]
fn test_wrap_at_whitespace() {
    let config = MinifyConfig::default().with_line_width(10);
    assert_eq!(
        minify_with("aaaa bbbb cccc dddd eeee", config),
        "aaaa bbbb cccc\ndddd eeee\n"
    );
}

#[test]
fn test_wrap_never_splits_string() {
    let config = MinifyConfig::default().with_line_width(5);
    assert_eq!(
        minify_with("x = \"a long string literal\" ;", config),
        "x=\"a long string literal\"\n;\n"
    );
}

#[test]
fn test_wrap_replaces_space_after_comment() {
    let config = MinifyConfig::default().with_line_width(3);
    assert_eq!(minify_with("abc/**/def", config), "abc\ndef\n");
}

#[test]
fn test_no_wrap_when_unlimited() {
    let text = "a b c d e f g h i j k l m n o p";
    assert_eq!(minify(text), format!("{text}\n"));
}

// ========== Emitter: state ==========

#[test]
fn test_state_carries_across_units() {
    let (out, report) = MergePipeline::default()
        .merge_to_string(&[
            SourceUnit::memory("a.cs", "int"),
            SourceUnit::memory("b.cs", "x;"),
        ])
        .unwrap();
    assert_eq!(out, "int x;\n");
    assert_eq!(report.sources, 2);
}

#[test]
fn test_emitter_tracks_column() {
    let mut out = Vec::new();
    let mut emitter = MinifyingEmitter::new(&mut out, &MinifyConfig::default());
    let mut scanner = Scanner::for_text("ab cd;");
    emitter.emit_unit(&mut scanner, "a.cs").unwrap();
    assert_eq!(
        emitter.state(),
        EmissionState {
            column: 6,
            tail: Some(';')
        }
    );
    emitter.finish().unwrap();
    assert_eq!(emitter.written(), 7);
    drop(emitter);
    assert_eq!(out, b"ab cd;\n");
}

#[test]
fn test_empty_input() {
    assert_eq!(minify(""), "");
    assert_eq!(minify("// only a comment\n"), "");
}

// ========== Errors ==========

#[test]
fn test_unterminated_string_is_fatal() {
    match minify_err("x = \"abc\ny") {
        MinifyError::Syntax {
            source_name,
            source,
        } => {
            assert_eq!(source_name, "a.cs");
            assert_eq!(source.found, Some('\n'));
            assert_eq!((source.line, source.column), (1, 9));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unterminated_comment_is_fatal() {
    match minify_err("int x; /* open") {
        MinifyError::Syntax { source, .. } => assert_eq!(source.found, None),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unterminated_literals_are_fatal() {
    assert!(matches!(minify_err("c = 'a"), MinifyError::Syntax { .. }));
    assert!(matches!(minify_err("s = @\"abc"), MinifyError::Syntax { .. }));
    assert!(matches!(minify_err("s = $\"{a"), MinifyError::Syntax { .. }));
}

#[test]
fn test_syntax_error_message() {
    let err = minify_err("s = \"abc");
    assert_eq!(
        err.to_string(),
        "a.cs: Unexpected end of input. Expecting \"\"\" at line 1, column 9, position 9."
    );
}

#[test]
fn test_invalid_keyword_rejected() {
    let pipeline = MergePipeline::new(MinifyConfig::default().with_import_keyword("1x"));
    let err = pipeline
        .merge_to_string(&[SourceUnit::memory("a.cs", "x")])
        .unwrap_err();
    assert!(matches!(err, MinifyError::InvalidConfig(_)));
}

#[test]
fn test_missing_file() {
    let err = MergePipeline::default()
        .merge_to_string(&[SourceUnit::file("/nonexistent/dir/a.cs")])
        .unwrap_err();
    assert!(matches!(err, MinifyError::Open { .. }));
}

// ========== Pipeline ==========

#[test]
fn test_merge_example() {
    let a = "using System;\nusing System.IO;\n#define X\nclass A{int x=1;}";
    let b = "using System;\nclass B{}";
    let (out, report) = MergePipeline::default()
        .merge_to_string(&[SourceUnit::memory("a.cs", a), SourceUnit::memory("b.cs", b)])
        .unwrap();
    assert_eq!(
        out,
        "#define X\nusing System;\nusing System.IO;\nclass A{int x=1;}class B{}\n"
    );
    assert_eq!(report.defines, 1);
    assert_eq!(report.imports, 2);
    assert_eq!(report.original_len, a.len() + b.len());
    assert_eq!(report.compressed_len, out.len());
    assert!(report.ratio() < 1.0);
    assert!(report.reduction_pct > 0.0);
}

#[test]
fn test_merge_preamble_only() {
    let pipeline = MergePipeline::default();
    let sources = [
        SourceUnit::memory("a.cs", "using B;\nusing A;\nx"),
        SourceUnit::memory("b.cs", "using A;\n#define D\ny"),
    ];
    let mut out = Vec::new();
    let table = pipeline.merge_preamble(&sources, &mut out).unwrap();
    assert_eq!(table.imports(), &["B".to_string(), "A".to_string()]);
    assert_eq!(out, b"#define D\nusing B;\nusing A;\n");
}

#[test]
fn test_merge_body_stats() {
    let pipeline = MergePipeline::default();
    let sources = [SourceUnit::memory("a.cs", "using A;\nint  x ;")];
    let mut out = Vec::new();
    let stats = pipeline.merge_body(&sources, &mut out).unwrap();
    assert_eq!(out, b"int x;\n");
    assert_eq!(stats.sources, 1);
    assert_eq!(stats.chars_read, 17);
    assert_eq!(stats.chars_written, 7);
}

#[test]
fn test_import_keyword_in_preamble() {
    let config = MinifyConfig::default().with_import_keyword("import");
    assert_eq!(
        minify_with("import a.b;\nclass C {}", config),
        "import a.b;\nclass C{}\n"
    );
}

#[test]
fn test_report_ratio_empty() {
    let (out, report) = MergePipeline::default().merge_to_string(&[]).unwrap();
    assert_eq!(out, "");
    assert_eq!(report.ratio(), 1.0);
    assert_eq!(report.reduction_pct, 0.0);
}
