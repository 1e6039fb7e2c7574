//! The counter controller end to end: interface, states, groups, RTL and
//! diagram text.

use fsmc_common::BitWidth;
use fsmc_conformance::{compile_str, dot_of, rtl_of, COUNTER};

#[test]
fn interface_is_inferred() {
    let result = compile_str(COUNTER);
    let fsm = result.fsm();

    let inputs: Vec<(&str, u32)> = fsm
        .inputs
        .iter()
        .map(|i| (i.name.as_str(), i.width.bits()))
        .collect();
    assert_eq!(inputs, vec![("vld", 1), ("clr", 1)]);

    assert_eq!(fsm.output("count").unwrap().width, BitWidth::new(2));
    assert_eq!(fsm.output("done").unwrap().width, BitWidth::ONE);
    assert_eq!(fsm.clock.name, "clk");
    assert_eq!(fsm.reset.name, "rst_n");
}

#[test]
fn states_are_derived_in_order() {
    let result = compile_str(COUNTER);
    let fsm = result.fsm();
    let names: Vec<&str> = fsm.all_states().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["IDLE", "S1", "S2", "S3"]);
    assert!(fsm.default_state.is_default);
    assert_eq!(fsm.default_state.name, "IDLE");
}

#[test]
fn equal_guards_share_a_group() {
    let result = compile_str(COUNTER);
    // IDLE->S1, S1->S2 and S2->S3 all mean `vld and !clr`.
    assert_eq!(result.groups(), vec![1, 2, 1, 2, 1, 3]);
}

#[test]
fn next_state_chain_keeps_declaration_order() {
    let rtl = rtl_of(COUNTER);
    let s1 = "      S1: begin\n\
               \x20        if (clr == 1'b1)\n\
               \x20           next_state = IDLE;\n\
               \x20        else if ((vld == 1'b1) && (clr == 1'b0))\n\
               \x20           next_state = S2;\n\
               \x20        else\n\
               \x20           next_state = S1;\n\
               \x20     end\n";
    assert!(rtl.contains(s1), "{rtl}");
}

#[test]
fn rtl_layout() {
    let rtl = rtl_of(COUNTER);
    assert!(rtl.starts_with("//| Name: ctrl.sv"));
    assert!(rtl.contains("module ctrl #() (\n"));
    assert!(rtl.contains("   input wire [0:0] clk,\n   input wire [0:0] rst_n,\n"));
    assert!(rtl.contains("   output reg [1:0] count,\n   output reg [0:0] done\n);"));
    assert!(rtl.contains("typedef enum {\n   IDLE,\n   S1,\n   S2,\n   S3\n} State ;"));
    assert!(rtl.contains("always_ff @(posedge clk, negedge rst_n) begin"));
    assert!(rtl.contains("      current_state <= IDLE ;"));
    assert!(rtl.contains("   count = 2'b00 ;\n   done = 1'b0 ;\n"));
    assert!(rtl.contains(
        "         else if ((!(vld == 1'b0)) && (!(clr == 1'b1))) begin\n            count = 2'b11 ;\n            done = 1'b1 ;\n         end\n"
    ));
    assert!(rtl.trim_end().ends_with("endmodule:ctrl"));
}

#[test]
fn transition_without_outputs_emits_no_block() {
    let rtl = rtl_of(COUNTER);
    // S3's only transition has no assignments.
    assert!(rtl.contains("      S3: begin\n      end\n"));
    assert!(!rtl.contains("next_state =="));
}

#[test]
fn rtl_is_reproducible() {
    assert_eq!(rtl_of(COUNTER), rtl_of(COUNTER));
}

#[test]
fn diagram_labels() {
    let dot = dot_of(COUNTER);
    assert!(dot.starts_with("digraph FSM {\n"));
    assert!(dot.contains("    \"\" -> \"IDLE\" [label=\"!rst_n\"]\n"));
    assert!(dot.contains("    \"IDLE\" -> \"S1\" [label=\"1\\n{count = 1, done = 0}\"]\n"));
    assert!(dot.contains("    \"S3\" -> \"IDLE\" [label=\"3\\n{count = 0, done = 0}\"]\n"));
}

#[test]
fn diagram_legend() {
    let result = compile_str(COUNTER);
    let diagram = fsmc_codegen::build_diagram(result.fsm()).unwrap();
    assert_eq!(
        diagram.legend(),
        Some(
            "Transitions:\n1 --> (vld)&(!clr)\n2 --> clr\n3 --> (clr)|(!vld)\n\nOutputs:\n{count, done}"
        )
    );
}
