/*!

This is the long-form manual for `likert_layout` and `likertplot`.

## How a diverging chart is laid out

Each question is one horizontal bar, stacked from the most negative answer on
the left to the most positive answer on the right. The bars are shifted so that
the middle of the scale of every question falls on the same vertical line,
the *center*:

* the *middle value* of a question is the number of answers left of the middle
  of the scale. When the scale has an odd number of categories, the middle
  category contributes half of its answers.
* the center is the largest middle value, plus a small margin (5% of the
  largest number of answers to one question by default).
* every bar starts with an invisible segment (the *padding*) of width
  `center - middle value`.

The questions are listed in reverse order in the output table, so that a renderer
stacking the bars from the bottom displays the first question at the top.

## Ticks

The ticks are placed symmetrically around the center and are labelled with the
distance to the center. The spacing is the smallest of `1, 2, 5, 10, 20, 50, ...`
such that half of the tick slots of the renderer cover the part of the axis right
of the center. The spacing can be forced with `--interval`.

Ticks beyond the largest number of answers to a question keep their mark but lose
their label.

## Input formats

### `csv`

One column per question, with the question in the first row and one row per
respondent. Empty cells are missing answers.

### `xlsx`

Same layout as `csv`, in an Excel workbook. The first worksheet is used unless
`--excel-worksheet-name` is given.

### `counts_csv`

Answers that are already counted: the first row holds an empty cell followed by the
categories of the scale, then one row per question with the question in the first
column followed by the counts.

## Scales

A scale is either one of the predefined scales (see [`crate::scales`]) passed with
`--scale`, or an explicit list of answers passed with repeated `--choices` flags,
from the most negative to the most positive.

Datasets in which some questions were left unanswered can use the `_0` variants of the
scales, which start with the `0` category. `--drop-zero-category` removes that category
before the percentages are computed.

Surveys recording answers as numbers can be converted with `--format-scale`: the answer
`2` becomes the third category of that scale.

## Configuration

All the options can also be given in a JSON file with `--config`:

```text
{
  "input": "survey.csv",
  "inputType": "csv",
  "scale": "agree5_0",
  "computePercentages": true,
  "dropZeroCategory": true,
  "barLabels": true,
  "xtickInterval": 20,
  "tickSlots": 10,
  "labelMaxWidth": 30,
  "palette": "default",
  "figureSize": [8.0, 6.0]
}
```

The older `plotPercentage` key is still understood. When present, it takes
precedence over `computePercentages`.

## Output

`likertplot` writes a JSON description of the chart: the padded table, one color per
column (the first one transparent), the center line, the ticks, the axis padding and
limits, the bar labels and the warnings. Any plotting tool able to draw stacked
horizontal bars can render it.

*/
