use mtkforth::runtime::built_ins::register_all_words;
use mtkforth::runtime::error::{ErrorKind, StackName};
use mtkforth::runtime::interpreter::forth_interpreter::ForthInterpreter;
use mtkforth::runtime::interpreter::{
    BranchResolution, CodeManagement, Interpreter, InterpreterConfig, InterpreterStack,
    WordManagement,
};
use mtkforth::runtime::output::CapturedOutput;

// Helper building an interpreter whose printed output can be read back.
fn interpreter_with(config: InterpreterConfig) -> (ForthInterpreter, CapturedOutput) {
    let mut interpreter = ForthInterpreter::with_config(config);
    let output = CapturedOutput::new();

    register_all_words(&mut interpreter);
    interpreter.set_output(Box::new(output.clone()));

    (interpreter, output)
}

fn interpreter() -> (ForthInterpreter, CapturedOutput) {
    interpreter_with(InterpreterConfig::default())
}

fn run(interpreter: &mut ForthInterpreter, source: &str) {
    let result = interpreter.process_source("<test>", source);
    assert!(result.is_ok(), "{} failed: {:?}", source, result.err());
}

fn stack_of(interpreter: &ForthInterpreter) -> Vec<i64> {
    interpreter.stack().iter().copied().collect()
}

#[test]
fn countdown_prints_until_the_flag_turns_true() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, ": countdown 3 begin dup . 1 - dup 0 = until drop ;");
    run(&mut interpreter, "countdown");

    assert_eq!(output.contents(), "3\n2\n1\n");
    assert!(stack_of(&interpreter).is_empty());
    assert!(interpreter.return_stack().is_empty());
}

#[test]
fn print_pops_from_the_top() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, "1 2 swap . .");

    assert_eq!(output.contents(), "1\n2\n");
    assert!(stack_of(&interpreter).is_empty());
}

#[test]
fn print_stack_shows_bottom_to_top() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, ".s 1 2 3 .s");

    assert_eq!(output.contents(), "stack: [] (0)\nstack: [1 2 3] (3)\n");
}

#[test]
fn undefined_word_reports_and_restores_stack() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, "1 2");
    interpreter.process_line("3 4 foo 5");

    assert_eq!(stack_of(&interpreter), vec![1, 2]);

    let report = output.contents();
    assert!(report.starts_with("Error: "), "unexpected report: {}", report);
    assert!(report.contains("The word 'foo' is not defined!"));
    assert!(report.contains("<repl> (1, 5)"));

    // The next unit starts from the restored stack.
    run(&mut interpreter, "+");
    assert_eq!(stack_of(&interpreter), vec![3]);
}

#[test]
fn failure_inside_compiled_word_restores_outermost_stack() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, ": inner 10 20 nope ;");
    run(&mut interpreter, ": outer 1 inner ;");
    run(&mut interpreter, "5");

    let result = interpreter.process_source("<test>", "6 outer");

    match result {
        Err(error) => {
            assert_eq!(error.kind(), &ErrorKind::UndefinedWord("nope".to_string()));

            let call_stack = error.call_stack().clone().unwrap_or_default();
            let names: Vec<&String> = call_stack.iter().map(|item| item.word()).collect();
            assert_eq!(names, vec!["outer", "inner"]);
        }
        Ok(()) => panic!("outer should have failed"),
    }

    assert_eq!(stack_of(&interpreter), vec![5]);
    assert!(interpreter.call_stack().is_empty());
    assert!(output.contents().contains("Call stack"));
}

#[test]
fn aborted_loop_leaves_return_stack_clean() {
    let (mut interpreter, _output) = interpreter();

    let result = interpreter.process_source("<test>", "begin 1 0 / again");

    assert!(result.is_err());
    assert!(interpreter.return_stack().is_empty());
    assert!(stack_of(&interpreter).is_empty());
}

#[test]
fn definition_body_is_not_checked_until_run() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": broken 1 nope ;");
    assert!(interpreter.find_word("broken").is_some());

    let result = interpreter.process_source("<test>", "broken");
    assert!(matches!(result, Err(ref error)
                     if error.kind() == &ErrorKind::UndefinedWord("nope".to_string())));
}

#[test]
fn redefinition_shadows_earlier_word() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": x 1 ;");
    run(&mut interpreter, ": x 2 ;");
    run(&mut interpreter, "x");

    assert_eq!(stack_of(&interpreter), vec![2]);
}

#[test]
fn compiled_words_can_shadow_native_words() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": dup 100 ;");
    run(&mut interpreter, "1 dup");

    assert_eq!(stack_of(&interpreter), vec![1, 100]);
}

#[test]
fn compiled_words_call_compiled_words() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": square dup * ;");
    run(&mut interpreter, ": fourth square square ;");
    run(&mut interpreter, "3 fourth");

    assert_eq!(stack_of(&interpreter), vec![81]);
}

#[test]
fn multi_line_definition_unit() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": cube\n  dup dup\n  * * ;");
    run(&mut interpreter, "2 cube");

    assert_eq!(stack_of(&interpreter), vec![8]);
}

#[test]
fn definition_without_terminator_takes_rest_of_unit() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": inc 1 +");
    run(&mut interpreter, "5 inc");

    assert_eq!(stack_of(&interpreter), vec![6]);
}

#[test]
fn tokens_after_terminator_run_immediately() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": f 42 ; f f");

    assert_eq!(stack_of(&interpreter), vec![42, 42]);
}

#[test]
fn words_lists_everything_without_side_effects() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, ": square dup * ;");
    run(&mut interpreter, "7");

    let count = interpreter.dictionary().len();

    run(&mut interpreter, "words");
    run(&mut interpreter, "words");

    assert_eq!(stack_of(&interpreter), vec![7]);
    assert_eq!(interpreter.dictionary().len(), count);

    let listing = output.contents();
    assert!(listing.contains(&format!("{} words defined.", count)));
    assert!(listing.contains(": square dup * ;"));
    assert!(listing.contains("swap"));
    assert!(listing.contains("begin"));
    assert!(listing.contains("then"));
}

#[test]
fn first_occurrence_mode_jumps_to_any_later_else() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, "0 if 1 then 2 if 3 else 4 then");

    assert_eq!(stack_of(&interpreter), vec![4]);
}

#[test]
fn nested_mode_matches_the_enclosing_then() {
    let config = InterpreterConfig {
        branch_resolution: BranchResolution::Nested,
        ..InterpreterConfig::default()
    };
    let (mut interpreter, _output) = interpreter_with(config);

    run(&mut interpreter, "0 if 1 then 2 if 3 else 4 then");
    assert_eq!(stack_of(&interpreter), vec![3]);

    run(&mut interpreter, "clear");
    run(&mut interpreter, ": sign dup 0 < if drop -1 else 0 > if 1 else 0 then then ;");
    run(&mut interpreter, "-5 sign 0 sign 9 sign");

    assert_eq!(stack_of(&interpreter), vec![-1, 0, 1]);
}

#[test]
fn nested_loops_share_the_return_stack() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, ": inner 2 begin 1 - dup 0 = until drop ;");
    run(&mut interpreter, "3 begin inner 1 - dup . dup 0 = until drop");

    assert_eq!(output.contents(), "2\n1\n0\n");
    assert!(stack_of(&interpreter).is_empty());
    assert!(interpreter.return_stack().is_empty());
}

#[test]
fn runaway_recursion_aborts_only_the_unit() {
    let (mut interpreter, output) = interpreter();

    run(&mut interpreter, ": f f ;");
    run(&mut interpreter, "1");

    let result = interpreter.process_source("<test>", "2 f");

    match result {
        Err(error) => assert_eq!(error.kind(), &ErrorKind::CallDepthExceeded(256)),
        Ok(()) => panic!("f should have failed"),
    }

    assert_eq!(stack_of(&interpreter), vec![1]);
    assert!(interpreter.call_stack().is_empty());
    assert!(output.contents().contains("Maximum call depth of 256 exceeded."));

    run(&mut interpreter, "1 2 +");
    assert_eq!(stack_of(&interpreter), vec![1, 3]);
}

#[test]
fn finite_recursion_runs_within_the_depth_limit() {
    let (mut interpreter, _output) = interpreter();

    run(&mut interpreter, ": down dup 0 = if drop else 1 - down then ;");
    run(&mut interpreter, "100 down");

    assert!(stack_of(&interpreter).is_empty());
    assert!(interpreter.call_stack().is_empty());

    let result = interpreter.process_source("<test>", "200000 down");
    assert!(matches!(result, Err(ref error)
                     if matches!(error.kind(), ErrorKind::CallDepthExceeded(_))));

    run(&mut interpreter, "7");
    assert_eq!(stack_of(&interpreter), vec![7]);
}

#[test]
fn call_depth_limit_is_configurable() {
    let config = InterpreterConfig {
        max_call_depth: 10,
        ..InterpreterConfig::default()
    };
    let (mut interpreter, _output) = interpreter_with(config);

    run(&mut interpreter, ": down dup 0 = if drop else 1 - down then ;");
    run(&mut interpreter, "5 down");
    assert!(stack_of(&interpreter).is_empty());

    let result = interpreter.process_source("<test>", "20 down");
    assert!(matches!(result, Err(ref error)
                     if error.kind() == &ErrorKind::CallDepthExceeded(10)));
    assert!(stack_of(&interpreter).is_empty());
}

#[test]
fn popping_an_empty_call_stack_names_the_call_stack() {
    let (mut interpreter, _output) = interpreter();

    let result = interpreter.call_stack_pop();

    match result {
        Err(error) => {
            assert_eq!(error.kind(), &ErrorKind::StackUnderflow(StackName::Call));
            assert!(error.to_string().contains("Call stack underflow."));
        }
        Ok(()) => panic!("the call stack should have been empty"),
    }
}
