use crate::models::StatusResponse;

pub fn render_index(status: &StatusResponse) -> String {
    INDEX_HTML
        .replace("{{COUNT}}", &status.click_count.to_string())
        .replace("{{LAST}}", &escape_html(&status.last_clicked))
        .replace("{{AUTO}}", bool_attr(status.auto_clicking))
        .replace("{{ANALYTICS}}", bool_attr(status.analytics_visible))
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Click Analytics</title>
  <style>
    :root {
      --ink: #1f2430;
      --muted: #667085;
      --surface: #ffffff;
      --panel: #f2f4f7;
      --primary: #1f2430;
      --secondary: #e4e7ec;
      --danger: #d92d20;
      --accent: #7a5af8;
      --ok: #12b76a;
      --chart-1: #2e90fa;
      --chart-2: #f79009;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      font-family: "Inter", "Segoe UI", sans-serif;
      color: var(--ink);
      background: #fafafa;
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 24px;
      padding: 48px 16px;
    }

    h1 { margin: 0 0 12px; font-size: 2.2rem; text-align: center; }
    h3 { margin: 0 0 12px; }

    .status {
      background: var(--panel);
      border-radius: 12px;
      padding: 16px 24px;
      text-align: center;
    }

    .status .last { color: var(--muted); font-size: 0.9rem; }
    .status .auto { color: var(--ok); font-weight: 600; font-size: 0.9rem; }

    .row { display: flex; gap: 12px; flex-wrap: wrap; justify-content: center; align-items: center; }
    .column { display: flex; gap: 12px; flex-direction: column; align-items: center; }
    .auto-panel { padding: 16px; border: 1px solid var(--secondary); border-radius: 12px; background: #eff8ff; }

    button {
      font: inherit;
      border-radius: 8px;
      border: 1px solid transparent;
      padding: 8px 16px;
      cursor: pointer;
      background: var(--primary);
      color: #fff;
    }

    button:disabled { opacity: 0.5; cursor: not-allowed; }
    button.secondary { background: var(--secondary); color: var(--ink); }
    button.destructive { background: var(--danger); }
    button.outline { background: transparent; color: var(--ink); border-color: var(--secondary); }
    button.ghost { background: transparent; color: var(--ink); }
    button.link { background: transparent; color: var(--ink); text-decoration: underline; }
    button.sm { padding: 4px 10px; font-size: 0.85rem; }
    button.lg { padding: 12px 28px; font-size: 1.1rem; }
    button.accent { background: var(--accent); }

    .card {
      width: min(1100px, 100%);
      background: var(--surface);
      border: 1px solid var(--secondary);
      border-radius: 16px;
      padding: 24px;
      display: grid;
      gap: 28px;
    }

    .card[hidden] { display: none; }
    svg { width: 100%; height: 280px; }
    .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 16px; }
    .summary div { background: var(--panel); border-radius: 10px; padding: 16px; text-align: center; }
    .summary strong { display: block; font-size: 1.6rem; }
    .empty { color: var(--muted); text-align: center; }
  </style>
</head>
<body data-auto="{{AUTO}}" data-analytics="{{ANALYTICS}}">
  <h1>Interactive Buttons</h1>

  <section class="status">
    <p>Total Clicks: <strong id="count">{{COUNT}}</strong></p>
    <p class="last" id="last">{{LAST}}</p>
    <p class="auto" id="auto-active" hidden>Auto-clicking active!</p>
  </section>

  <button class="accent" id="toggle">Show Click Analytics</button>

  <section class="card" id="analytics" hidden>
    <div>
      <h3 id="line-title">All Clicks Over Time</h3>
      <svg id="line-chart" viewBox="0 0 800 280" preserveAspectRatio="none"></svg>
    </div>
    <div>
      <h3>Button Type Frequency</h3>
      <svg id="bar-chart" viewBox="0 0 800 280" preserveAspectRatio="none"></svg>
    </div>
    <div>
      <h3>Clicks Per Minute</h3>
      <svg id="minute-chart" viewBox="0 0 800 280" preserveAspectRatio="none"></svg>
    </div>
    <div class="summary">
      <div><strong id="sum-total">0</strong>Total Clicks</div>
      <div><strong id="sum-distinct">0</strong>Different Buttons</div>
      <div><strong id="sum-auto">0%</strong>Auto Clicks</div>
    </div>
  </section>
  <section class="card" id="analytics-empty" hidden>
    <p class="empty">No click data yet. Start clicking buttons to see analytics!</p>
  </section>

  <div class="row auto-panel">
    <button id="auto-start">Start Auto Clicker</button>
    <button class="outline" id="auto-stop">Stop Auto Clicker</button>
  </div>

  <div class="row">
    <button data-label="Default">Default Button</button>
    <button class="secondary" data-label="Secondary">Secondary</button>
    <button class="destructive" data-label="Destructive">Destructive</button>
    <button class="outline" data-label="Outline">Outline</button>
    <button class="ghost" data-label="Ghost">Ghost</button>
    <button class="link" data-label="Link">Link</button>
  </div>

  <div class="row">
    <button class="sm" data-label="Small">Small</button>
    <button data-label="Default Size">Default</button>
    <button class="lg" data-label="Large">Large</button>
  </div>

  <div class="column">
    <button id="alert">Show Alert</button>
    <form method="post" action="/reset">
      <button class="outline" type="submit" id="reset">Reset Counter &amp; Stop Auto</button>
    </form>
    <button class="destructive" id="confirm">Confirm Action</button>
  </div>

  <script>
    const SVG_NS = 'http://www.w3.org/2000/svg';
    const WIDTH = 800;
    const HEIGHT = 280;
    const PAD = 36;
    const PALETTE = ['#2e90fa', '#f79009', '#12b76a', '#7a5af8', '#f04438', '#0ba5ec', '#ee46bc', '#667085'];

    let status = {
      click_count: Number(document.getElementById('count').textContent),
      last_clicked: document.getElementById('last').textContent,
      auto_clicking: document.body.dataset.auto === 'true',
      analytics_visible: document.body.dataset.analytics === 'true',
    };

    async function post(path, body) {
      const res = await fetch(path, {
        method: 'POST',
        headers: body ? { 'Content-Type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined,
      });
      if (!res.ok) {
        throw new Error(await res.text());
      }
      return res.json();
    }

    function applyStatus(next) {
      status = next;
      document.getElementById('count').textContent = next.click_count;
      document.getElementById('last').textContent = next.last_clicked ? `Last clicked: ${next.last_clicked}` : '';
      document.getElementById('auto-active').hidden = !next.auto_clicking;
      const start = document.getElementById('auto-start');
      start.disabled = next.auto_clicking;
      start.className = next.auto_clicking ? 'secondary' : '';
      start.textContent = next.auto_clicking ? 'Auto-Clicking...' : 'Start Auto Clicker';
      document.getElementById('auto-stop').disabled = !next.auto_clicking;
      document.getElementById('toggle').textContent = `${next.analytics_visible ? 'Hide' : 'Show'} Click Analytics`;
      refreshAnalytics();
    }

    function el(name, attrs, text) {
      const node = document.createElementNS(SVG_NS, name);
      for (const [key, value] of Object.entries(attrs)) {
        node.setAttribute(key, value);
      }
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    }

    function axes(svg, max) {
      svg.appendChild(el('line', { x1: PAD, y1: HEIGHT - PAD, x2: WIDTH - 8, y2: HEIGHT - PAD, stroke: '#d0d5dd' }));
      svg.appendChild(el('text', { x: 4, y: PAD, 'font-size': 11, fill: '#667085' }, String(max)));
      svg.appendChild(el('text', { x: 4, y: HEIGHT - PAD, 'font-size': 11, fill: '#667085' }, '0'));
    }

    function clock(ms) {
      return new Date(ms).toLocaleTimeString();
    }

    function drawLine(svg, series, stride) {
      svg.replaceChildren();
      const max = Math.max(1, series.length);
      axes(svg, max);
      const step = (WIDTH - PAD - 16) / Math.max(1, series.length - 1);
      const y = (total) => HEIGHT - PAD - (total / max) * (HEIGHT - 2 * PAD);
      const points = series.map((p, i) => `${PAD + i * step},${y(p.cumulative_total)}`).join(' ');
      svg.appendChild(el('polyline', { points, fill: 'none', stroke: '#2e90fa', 'stroke-width': 2 }));
      series.forEach((p, i) => {
        const cx = PAD + i * step;
        const dot = el('circle', { cx, cy: y(p.cumulative_total), r: 4, fill: '#2e90fa' });
        dot.appendChild(el('title', {}, `Time: ${clock(p.occurred_at)} | Button: ${p.label}`));
        svg.appendChild(dot);
        if (i % stride === 0) {
          svg.appendChild(el('text', { x: cx, y: HEIGHT - 12, 'font-size': 10, 'text-anchor': 'middle', fill: '#667085' }, clock(p.occurred_at)));
        }
      });
    }

    function drawBars(svg, groups, series) {
      svg.replaceChildren();
      const max = Math.max(1, ...groups.map((g) => Math.max(0, ...g.values)));
      axes(svg, max);
      const slot = (WIDTH - PAD - 16) / Math.max(1, groups.length);
      const barWidth = Math.max(2, (slot * 0.8) / Math.max(1, series.length));
      groups.forEach((group, gi) => {
        const x0 = PAD + gi * slot + slot * 0.1;
        group.values.forEach((value, si) => {
          const h = (value / max) * (HEIGHT - 2 * PAD);
          const bar = el('rect', { x: x0 + si * barWidth, y: HEIGHT - PAD - h, width: barWidth - 1, height: h, fill: PALETTE[si % PALETTE.length] });
          bar.appendChild(el('title', {}, `${series[si]}: ${value}`));
          svg.appendChild(bar);
        });
        svg.appendChild(el('text', { x: x0 + slot * 0.4, y: HEIGHT - 12, 'font-size': 10, 'text-anchor': 'middle', fill: '#667085' }, group.name));
      });
    }

    async function refreshAnalytics() {
      const panel = document.getElementById('analytics');
      const empty = document.getElementById('analytics-empty');
      if (!status.analytics_visible) {
        panel.hidden = true;
        empty.hidden = true;
        return;
      }

      const res = await fetch('/api/analytics');
      if (!res.ok) {
        return;
      }
      const data = await res.json();
      const hasData = data.cumulative_series.length > 0;
      panel.hidden = !hasData;
      empty.hidden = hasData;
      if (!hasData) {
        return;
      }

      document.getElementById('line-title').textContent = `All Clicks Over Time (${data.summary.total_clicks} total)`;
      drawLine(document.getElementById('line-chart'), data.cumulative_series, data.tick_stride);
      drawBars(
        document.getElementById('bar-chart'),
        data.label_frequency.map((entry) => ({ name: entry.label, values: [entry.count] })),
        ['Click Count'],
      );
      const labels = data.label_frequency.map((entry) => entry.label);
      drawBars(
        document.getElementById('minute-chart'),
        data.minute_buckets.map((bucket) => ({ name: bucket.minute, values: bucket.counts.map((c) => c.count) })),
        labels,
      );
      document.getElementById('sum-total').textContent = data.summary.total_clicks;
      document.getElementById('sum-distinct').textContent = data.summary.distinct_labels;
      document.getElementById('sum-auto').textContent = `${data.summary.auto_click_percent.toFixed(1)}%`;
    }

    async function refreshStatus() {
      const res = await fetch('/api/status');
      if (res.ok) {
        applyStatus(await res.json());
      }
    }

    document.querySelectorAll('button[data-label]').forEach((button) => {
      button.addEventListener('click', async () => {
        applyStatus(await post('/api/click', { label: button.dataset.label }));
      });
    });

    document.getElementById('toggle').addEventListener('click', async () => {
      applyStatus(await post('/api/analytics/toggle'));
    });

    document.getElementById('auto-start').addEventListener('click', async () => {
      applyStatus(await post('/api/auto/start'));
    });

    document.getElementById('auto-stop').addEventListener('click', async () => {
      applyStatus(await post('/api/auto/stop'));
    });

    document.getElementById('alert').addEventListener('click', async () => {
      const res = await post('/api/alert');
      alert(res.message);
      applyStatus(res.status);
    });

    document.getElementById('reset').closest('form').addEventListener('submit', async (event) => {
      event.preventDefault();
      applyStatus(await post('/api/reset'));
    });

    document.getElementById('confirm').addEventListener('click', async () => {
      const confirmed = confirm('Are you sure you want to do this?');
      if (confirmed) {
        alert('You confirmed!');
      }
      applyStatus(await post('/api/confirm', { confirmed }));
    });

    setInterval(() => {
      if (status.auto_clicking) {
        refreshStatus();
      }
    }, 1000);

    applyStatus(status);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(last_clicked: &str) -> StatusResponse {
        StatusResponse {
            click_count: 7,
            last_clicked: last_clicked.to_string(),
            auto_clicking: true,
            analytics_visible: false,
        }
    }

    #[test]
    fn index_fills_placeholders() {
        let html = render_index(&status("Ghost"));
        assert!(html.contains(r#"<strong id="count">7</strong>"#));
        assert!(html.contains(r#"data-auto="true""#));
        assert!(html.contains(r#"data-analytics="false""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn index_escapes_labels() {
        let html = render_index(&status("<b>\"x\"</b>"));
        assert!(html.contains("&lt;b&gt;&quot;x&quot;&lt;/b&gt;"));
        assert!(!html.contains("<b>\"x\"</b>"));
    }
}
