//! Snapshot tests for rendered estimates

use klm::klm::processor::{render, Estimator, OutputFormat};
use klm::klm::reporting::NullReporter;
use klm::klm::CostTable;

#[test]
fn text_report_for_mouse_sample() {
    let source = std::fs::read_to_string("docs/samples/calculator-mouse.klm").unwrap();
    let estimate = Estimator::builtin().estimate(&source, &mut NullReporter);

    insta::assert_snapshot!(render(&estimate, OutputFormat::Text, 3).unwrap(), @r###"
    Input operators were: MPBPBPBMPBPBPB
    Predicted task completion time for the given operators using custom klm values: 2.400 seconds.
    Predicted task completion time for the given operators using default klm values: 9.600 seconds.
    "###);
}

#[test]
fn json_report_with_warning() {
    let table = CostTable::new([('K', 0.5)]).unwrap();
    let estimate = Estimator::new()
        .with_table("half", table)
        .estimate("k ? 2k", &mut NullReporter);

    insta::assert_snapshot!(render(&estimate, OutputFormat::Json, 3).unwrap(), @r###"
    {
      "operators": "K?2K",
      "results": [
        {
          "table": "half",
          "total": 1.5,
          "warnings": [
            {
              "character": "?",
              "position": 1
            }
          ]
        }
      ]
    }
    "###);
}
