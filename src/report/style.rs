//! Stylesheet for generated reports.

use super::config::ReportConfig;

/// Build the report stylesheet for `config`.
///
/// Print media hides the controls, tightens spacing and keeps every section, card and chart on
/// one page.
pub fn generate_styles(config: &ReportConfig) -> String {
    let primary = css_value(&config.primary_color);
    let page_size = css_value(&config.page_size);
    let margins = css_value(&config.margins);

    format!(
        r#"
@page {{
    size: {page_size};
    margin: {margins};
}}

:root {{
    --primary: {primary};
    --success: #16a34a;
    --danger: #dc2626;
    --warning: #d97706;
    --info: #0891b2;
    --gray-50: #f9fafb;
    --gray-100: #f3f4f6;
    --gray-200: #e5e7eb;
    --gray-300: #d1d5db;
    --gray-500: #6b7280;
    --gray-700: #374151;
    --gray-900: #111827;
}}

* {{
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}}

body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    background: var(--gray-100);
    color: var(--gray-900);
    line-height: 1.5;
    padding: 2rem;
}}

.pdf-container {{
    max-width: 210mm;
    margin: 0 auto;
    background: white;
    border: 1px solid var(--gray-300);
    border-radius: 0.5rem;
    padding: 2rem;
}}

.report-header {{
    border-bottom: 3px solid var(--primary);
    padding-bottom: 1rem;
    margin-bottom: 1.5rem;
}}

.report-header .company-name {{
    font-size: 1.75rem;
    font-weight: 700;
    color: var(--primary);
}}

.report-header .report-title {{
    font-size: 1.25rem;
    font-weight: 600;
    color: var(--gray-700);
}}

.report-header .report-meta {{
    font-size: 0.875rem;
    color: var(--gray-500);
}}

.section {{
    margin-bottom: 1.5rem;
}}

.section-title {{
    font-size: 1.1rem;
    font-weight: 600;
    color: var(--primary);
    border-left: 4px solid var(--primary);
    padding-left: 0.75rem;
    margin-bottom: 0.75rem;
}}

.summary-cards {{
    display: grid;
    grid-template-columns: repeat(4, 1fr);
    gap: 1rem;
}}

.card {{
    border: 1px solid var(--gray-200);
    border-radius: 0.5rem;
    padding: 1rem;
    background: var(--gray-50);
}}

.card h3 {{
    font-size: 0.75rem;
    font-weight: 500;
    color: var(--gray-500);
    text-transform: uppercase;
    letter-spacing: 0.05em;
}}

.card .value {{
    font-size: 1.25rem;
    font-weight: 600;
}}

table {{
    width: 100%;
    border-collapse: collapse;
    font-size: 0.875rem;
}}

th {{
    background: var(--primary);
    color: white;
    text-align: left;
    padding: 0.5rem 0.75rem;
}}

td {{
    padding: 0.5rem 0.75rem;
    border-bottom: 1px solid var(--gray-200);
}}

td.number, th.number {{
    text-align: right;
    font-variant-numeric: tabular-nums;
}}

.totals-row td {{
    font-weight: 700;
    border-top: 2px solid var(--gray-700);
    background: var(--gray-50);
}}

.no-data {{
    padding: 1.5rem;
    text-align: center;
    color: var(--gray-500);
    font-style: italic;
    border: 1px dashed var(--gray-300);
    border-radius: 0.5rem;
}}

.status-breakdown {{
    margin-top: 1rem;
}}

.status-breakdown h3 {{
    font-size: 0.95rem;
    margin-bottom: 0.5rem;
}}

.status-row {{
    display: grid;
    grid-template-columns: 8rem 1fr 4rem 3rem;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.875rem;
    margin-bottom: 0.25rem;
}}

.status-bar {{
    height: 0.5rem;
    background: var(--gray-200);
    border-radius: 9999px;
    overflow: hidden;
}}

.status-bar-fill {{
    height: 100%;
    background: var(--primary);
}}

.charts-grid {{
    display: grid;
    grid-template-columns: repeat(2, 1fr);
    gap: 1rem;
}}

.chart-card {{
    border: 1px solid var(--gray-200);
    border-radius: 0.5rem;
    padding: 1rem;
}}

.chart-card h3 {{
    font-size: 0.95rem;
    margin-bottom: 0.75rem;
}}

.bar-chart {{
    display: flex;
    align-items: flex-end;
    gap: 0.5rem;
    height: 180px;
}}

.bar-column {{
    flex: 1;
    display: flex;
    flex-direction: column;
    justify-content: flex-end;
    align-items: center;
    height: 100%;
}}

.bar {{
    width: 100%;
    background: var(--primary);
    border-radius: 0.25rem 0.25rem 0 0;
    min-height: 1px;
}}

.bar-label, .bar-value {{
    font-size: 0.7rem;
    color: var(--gray-700);
}}

.pie {{
    width: 160px;
    height: 160px;
    border-radius: 50%;
    margin: 0 auto 0.75rem;
}}

.legend-item {{
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.8rem;
}}

.legend-swatch {{
    width: 0.75rem;
    height: 0.75rem;
    border-radius: 0.125rem;
}}

.line-chart svg {{
    width: 100%;
    height: auto;
}}

.line-chart polyline {{
    fill: none;
    stroke: var(--primary);
    stroke-width: 2;
}}

.line-chart circle {{
    fill: var(--primary);
}}

.hbar-row {{
    display: grid;
    grid-template-columns: 8rem 1fr 3rem;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.8rem;
    margin-bottom: 0.375rem;
}}

.hbar-track {{
    background: var(--gray-100);
    height: 0.75rem;
    border-radius: 0.25rem;
}}

.hbar {{
    height: 100%;
    background: var(--primary);
    border-radius: 0.25rem;
}}

.print-controls {{
    display: flex;
    justify-content: center;
    gap: 1rem;
    margin-top: 2rem;
}}

.btn {{
    padding: 0.625rem 1.5rem;
    border: none;
    border-radius: 0.375rem;
    font-size: 0.875rem;
    cursor: pointer;
}}

.btn-print {{
    background: var(--primary);
    color: white;
}}

.btn-close {{
    background: var(--gray-200);
    color: var(--gray-700);
}}

.report-footer {{
    margin-top: 1.5rem;
    font-size: 0.75rem;
    color: var(--gray-500);
    text-align: center;
}}

@media print {{
    body {{
        background: white;
        padding: 0;
    }}

    .pdf-container {{
        border: none;
        border-radius: 0;
        padding: 0;
        max-width: none;
    }}

    .print-controls {{
        display: none !important;
    }}

    .section {{
        margin-bottom: 1rem;
    }}

    .section, .card, .chart-card, .status-breakdown, table {{
        break-inside: avoid;
        page-break-inside: avoid;
    }}

    th, .bar, .hbar, .status-bar-fill, .pie, .legend-swatch {{
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
    }}
}}
"#
    )
}

/// Strip characters that could terminate a declaration or escape the style block.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}
