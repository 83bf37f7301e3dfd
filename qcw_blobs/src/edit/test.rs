#[cfg(test)]
mod test {
    use super::super::*;
    use crate::barchart::{Line, SymbolEntry};
    use crate::test_utils;
    use qcw_types::defines::StudyType;
    use qcw_types::error::{format_error, FormatError};

    fn lines_of<'a>(group: &'a StudyLineGroup, name: &str) -> Option<&'a [Line]> {
        group.symbol(name).map(|sym| sym.lines.as_slice())
    }

    fn names(group: &StudyLineGroup) -> Vec<&str> {
        group.symbols().iter().map(SymbolEntry::name).collect()
    }

    fn target_and_source() -> (BarChart, BarChart) {
        let target = test_utils::chart(
            "IBM",
            vec![SymbolEntry::new("IBM", vec![test_utils::trendline(1.0, 1.0)])],
            vec![],
        );
        let source = test_utils::chart(
            "IBM",
            vec![
                SymbolEntry::new("IBM", vec![test_utils::trendline(2.0, 2.0)]),
                SymbolEntry::new("MSFT", vec![test_utils::trendline(3.0, 3.0)]),
            ],
            vec![SymbolEntry::new("IBM", vec![test_utils::note("divergence")])],
        );
        (target, source)
    }

    #[test]
    fn merge_without_clash() -> Result<()> {
        let (mut target, source) = target_and_source();
        let studies = [StudyType::Rsi];
        let skip = MergeResolution::Skip;

        assert!(merge_chart_lines(&mut target, &source, &studies, false, skip)?);
        assert_eq!(target.panes[1].lines, source.panes[1].lines);
        assert_eq!(names(&target.panes[0].lines), vec!["IBM"]);

        // Everything clashes now.
        assert!(!merge_chart_lines(&mut target, &source, &studies, false, skip)?);

        // Neither chart has a MACD pane.
        let studies = [StudyType::Macd];
        let union = MergeResolution::Union;
        assert!(!merge_chart_lines(&mut target, &source, &studies, false, union)?);
        Ok(())
    }

    #[test]
    fn merge_resolutions() -> Result<()> {
        // With prices included, both studies pick the price pane. It is merged once.
        let studies = [StudyType::Rsi, StudyType::MovingAverage];
        let t1 = test_utils::trendline(1.0, 1.0);
        let t2 = test_utils::trendline(2.0, 2.0);

        let (mut target, source) = target_and_source();
        let changed =
            merge_chart_lines(&mut target, &source, &studies, true, MergeResolution::Union)?;
        assert!(changed);
        let price = &target.panes[0].lines;
        assert_eq!(names(price), vec!["IBM", "MSFT"]);
        assert_eq!(lines_of(price, "IBM"), Some(&[t1.clone(), t2.clone()][..]));
        assert!(target.panes[1].lines.symbols().is_empty());

        let (mut target, source) = target_and_source();
        merge_chart_lines(&mut target, &source, &studies, true, MergeResolution::KeepOld)?;
        assert_eq!(lines_of(&target.panes[0].lines, "IBM"), Some(&[t2][..]));

        let (mut target, source) = target_and_source();
        let changed =
            merge_chart_lines(&mut target, &source, &studies, true, MergeResolution::KeepNew)?;
        assert!(changed, "MSFT is new to the target");
        assert_eq!(lines_of(&target.panes[0].lines, "IBM"), Some(&[t1][..]));
        Ok(())
    }

    fn clash_workspace() -> Workspace {
        let first = test_utils::chart(
            "IBM",
            vec![
                SymbolEntry::new("IBM", vec![test_utils::trendline(1.0, 1.0)]),
                SymbolEntry::new("SPY", vec![test_utils::trendline(2.0, 2.0)]),
            ],
            vec![SymbolEntry::new("IBM", vec![test_utils::note("n")])],
        );
        let second = test_utils::chart("SPY", vec![], vec![]);
        test_utils::workspace(first, second)
    }

    fn price_group(ws: &Workspace) -> &StudyLineGroup {
        &ws.charts().next().unwrap().panes[0].lines
    }
    fn rsi_group(ws: &Workspace) -> &StudyLineGroup {
        &ws.charts().next().unwrap().panes[1].lines
    }

    #[test]
    fn replace_renames_or_copies() -> Result<()> {
        let mut ws = clash_workspace();
        assert!(replace_symbols(&mut ws, &[("IBM", "IBM.N")], true, MergeResolution::Skip)?);
        assert_eq!(names(price_group(&ws)), vec!["IBM.N", "SPY"]);
        assert_eq!(names(rsi_group(&ws)), vec!["IBM.N"]);

        let mut ws = clash_workspace();
        assert!(replace_symbols(&mut ws, &[("IBM", "IBM.N")], false, MergeResolution::Skip)?);
        let price = price_group(&ws);
        assert_eq!(names(price), vec!["IBM", "SPY", "IBM.N"]);
        assert_eq!(lines_of(price, "IBM"), lines_of(price, "IBM.N"));

        let mut ws = clash_workspace();
        assert!(!replace_symbols(&mut ws, &[("AAPL", "IBM")], true, MergeResolution::Union)?);
        assert_eq!(ws, clash_workspace());
        Ok(())
    }

    #[test]
    fn replace_with_clash() -> Result<()> {
        let t1 = test_utils::trendline(1.0, 1.0);
        let t2 = test_utils::trendline(2.0, 2.0);
        let mapping = [("IBM", "SPY")];

        let mut ws = clash_workspace();
        assert!(replace_symbols(&mut ws, &mapping, true, MergeResolution::Union)?);
        let price = price_group(&ws);
        assert_eq!(names(price), vec!["SPY"]);
        assert_eq!(lines_of(price, "SPY"), Some(&[t2.clone(), t1.clone()][..]));
        // No clash in the RSI pane: renamed.
        assert_eq!(names(rsi_group(&ws)), vec!["SPY"]);

        let mut ws = clash_workspace();
        assert!(replace_symbols(&mut ws, &mapping, false, MergeResolution::KeepOld)?);
        let price = price_group(&ws);
        assert_eq!(names(price), vec!["IBM", "SPY"]);
        assert_eq!(lines_of(price, "SPY"), Some(&[t1][..]));

        let mut ws = clash_workspace();
        replace_symbols(&mut ws, &mapping, true, MergeResolution::Skip)?;
        assert_eq!(names(price_group(&ws)), vec!["IBM", "SPY"]);

        let mut ws = clash_workspace();
        replace_symbols(&mut ws, &mapping, true, MergeResolution::KeepNew)?;
        let price = price_group(&ws);
        assert_eq!(names(price), vec!["SPY"]);
        assert_eq!(lines_of(price, "SPY"), Some(&[t2][..]));
        Ok(())
    }

    #[test]
    fn replace_into_one_name_twice() {
        let mut ws = clash_workspace();
        let mapping = [("IBM", "QQQ"), ("SPY", "QQQ")];
        let err = replace_symbols(&mut ws, &mapping, true, MergeResolution::Skip).unwrap_err();
        assert_eq!(format_error(&err), Some(&FormatError::DuplicateSymbol("QQQ".into())));
    }
}
