//! Integration tests for pibt-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use pibt_core::Coord;

    use crate::csv::CsvWriter;
    use crate::row::StepSummaryRow;
    use crate::writer::PlanWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_positions.csv").exists());
        assert!(dir.path().join("step_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_positions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["timestep", "agent_id", "x", "y"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["timestep", "moved_agents", "agents_at_goal"]);
    }

    #[test]
    fn csv_configuration_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_configuration(4, &[Coord::new(1, 2), Coord::new(3, 0)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_positions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4"); // timestep
        assert_eq!(&rows[0][1], "0"); // agent_id
        assert_eq!(&rows[0][2], "1");
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[1][1], "1");
        assert_eq!(&rows[1][2], "3");
    }

    #[test]
    fn csv_step_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step_summary(&StepSummaryRow { timestep: 3, moved_agents: 7, agents_at_goal: 2 })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "7");
        assert_eq!(&rows[0][2], "2");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_configuration_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_configuration(0, &[]).unwrap();
    }
}

// ── Visualizer format ─────────────────────────────────────────────────────────

#[cfg(test)]
mod visualizer_tests {
    use pibt_core::{Coord, Plan};

    use crate::visualizer::{VisualizerWriter, parse_plan, read_plan, write_plan};
    use crate::writer::PlanWriter;
    use crate::OutputError;

    fn c(x: u32, y: u32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn line_format() {
        let mut w = VisualizerWriter::new(Vec::new());
        w.write_configuration(0, &[c(0, 0), c(2, 1)]).unwrap();
        w.write_configuration(1, &[c(1, 0), c(2, 2)]).unwrap();
        w.finish().unwrap();
        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(text, "0:(0,0),(2,1),\n1:(1,0),(2,2),\n");
    }

    #[test]
    fn parse_tolerates_spacing_and_missing_trailing_comma() {
        let text = "0:(0,0), (2, 1)\n\n1: (1,0),(2,2),\n";
        let plan = parse_plan(text.as_bytes()).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.configs()[0], vec![c(0, 0), c(2, 1)]);
        assert_eq!(plan.configs()[1], vec![c(1, 0), c(2, 2)]);
    }

    #[test]
    fn parse_rejects_out_of_order_timestep() {
        let text = "0:(0,0),\n2:(1,0),\n";
        match parse_plan(text.as_bytes()) {
            Err(OutputError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_bad_cell() {
        assert!(parse_plan("0:(0,x),\n".as_bytes()).is_err());
        assert!(parse_plan("0:(0,0\n".as_bytes()).is_err());
        assert!(parse_plan("(0,0),\n".as_bytes()).is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("plan.txt");
        let plan = Plan::from_configs(vec![
            vec![c(0, 0), c(3, 3)],
            vec![c(1, 0), c(3, 2)],
            vec![c(2, 0), c(3, 1)],
        ]);
        write_plan(&path, &plan).unwrap();
        assert_eq!(read_plan(&path).unwrap(), plan);
    }
}

// ── Observer bridge ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use pibt_core::Coord;
    use pibt_grid::Grid;
    use pibt_solver::{PibtBuilder, validate_plan};

    use crate::csv::CsvWriter;
    use crate::observer::PlanOutputObserver;
    use crate::visualizer::{VisualizerWriter, parse_plan};
    use crate::writer::PlanWriter;
    use crate::{OutputError, OutputResult};

    fn c(x: u32, y: u32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn visualizer_output_matches_returned_plan() {
        let grid = Grid::open(4, 4);
        let starts = vec![c(0, 0), c(3, 3), c(3, 0)];
        let goals = vec![c(3, 3), c(0, 0), c(0, 3)];
        let mut pibt = PibtBuilder::new(grid, starts.clone(), goals.clone())
            .seed(2)
            .max_timestep(200)
            .build()
            .unwrap();

        let mut obs = PlanOutputObserver::new(VisualizerWriter::new(Vec::new()));
        let plan = pibt.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let text = obs.into_writer().into_inner();
        let read_back = parse_plan(text.as_slice()).unwrap();
        assert_eq!(read_back, plan);
        validate_plan(pibt.grid(), &starts, &goals, &read_back).unwrap();
    }

    #[test]
    fn integration_csv() {
        let grid = Grid::open(5, 1);
        let mut pibt = PibtBuilder::new(grid, vec![c(0, 0), c(4, 0)], vec![c(2, 0), c(4, 0)])
            .build()
            .unwrap();

        let dir = tempfile::tempdir().expect("create temp dir");
        let mut obs = PlanOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let plan = pibt.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(plan.len(), 3);

        // 3 configurations × 2 agents.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_positions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);

        let mut rdr = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[1][1], "1");
        assert_eq!(&rows[1][2], "2");
    }

    struct FailingWriter {
        calls: usize,
    }

    impl PlanWriter for FailingWriter {
        fn write_configuration(&mut self, t: usize, _config: &[Coord]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Parse { line: t, message: format!("call {}", self.calls) })
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut pibt = PibtBuilder::new(Grid::open(3, 1), vec![c(0, 0)], vec![c(2, 0)])
            .build()
            .unwrap();
        let mut obs = PlanOutputObserver::new(FailingWriter { calls: 0 });
        pibt.run(&mut obs).unwrap();

        match obs.take_error() {
            Some(OutputError::Parse { line, message }) => {
                assert_eq!(line, 0);
                assert_eq!(message, "call 1");
            }
            other => panic!("expected stored error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }
}
