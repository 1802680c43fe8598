//! End-to-end ordering guarantees: comments go first, directives second,
//! expansion third, literal escaping last, and a second run over the output
//! changes nothing.

use pp::{Output, Preprocessor};

fn run(source: &str) -> Output {
    Preprocessor::default().run(source).unwrap()
}

fn texts(out: &Output) -> Vec<&str> {
    out.lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn comments_are_stripped_before_directives_match() {
    // A directive buried behind a comment marker never executes.
    let out = run("NOP ; #define A 1\nDB A\n");
    assert_eq!(texts(&out), vec!["NOP", "DB A"]);
}

#[test]
fn comment_after_a_directive_does_not_break_it() {
    let out = run("#define A 7 ; speed\nDB A\n");
    // The comment is cut first, then the trimmed tail parses as the body.
    assert_eq!(texts(&out), vec!["DB 7"]);
}

#[test]
fn expansion_runs_before_escaping() {
    // The macro body carries a string literal; it is escaped only after
    // substitution put it on the line.
    let out = run("#define GREET \"Hi\"\nDB GREET\n");
    assert_eq!(texts(&out), vec!["DB 48h, 69h"]);
}

#[test]
fn char_arguments_reach_the_escaper() {
    let out = run("#define LOAD(c) MOV A, #c\nLOAD('x')\n");
    assert_eq!(texts(&out), vec!["MOV A, #78h"]);
}

#[test]
fn output_is_free_of_recognized_directives() {
    let out = run(
        "#define A 1\n#ifdef A\nDB A\n#else\nDB 0\n#endif\n#undefine A\nDB A\n",
    );
    assert_eq!(texts(&out), vec!["DB 1", "DB 0", "DB A"]);
}

#[test]
fn second_run_over_the_output_is_identity() {
    let out = run("#define A \"ok\"\nstart:\nDB A, 'z'\nJMP start\n");
    let first = out.text();
    let again = Preprocessor::default().run(&first).unwrap();
    assert_eq!(again.text(), first);
}

#[test]
fn whitespace_only_lines_never_reach_the_output() {
    let out = run("   \n\t\nDB 1\n   ; note\n");
    assert_eq!(texts(&out), vec!["DB 1"]);
}

#[test]
fn directive_keywords_survive_as_text_when_malformed() {
    // Misspelled or incomplete forms are not directives; they are expanded
    // and escaped like any other line.
    let out = run("#def A 1\n#include\n#ifdef\n");
    assert_eq!(texts(&out), vec!["#def A 1", "#include", "#ifdef"]);
}

#[test]
fn numbers_track_physical_lines_through_the_whole_run() {
    let out = run("; banner\n\n#define A 1\nDB A\n\nEND\n");
    let numbered: Vec<(usize, &str)> = out
        .lines
        .iter()
        .map(|l| (l.number, l.text.as_str()))
        .collect();
    assert_eq!(numbered, vec![(3, "DB 1"), (5, "END")]);
}
