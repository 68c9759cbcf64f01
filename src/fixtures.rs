//! Trimmed copies of season pages used by the unit tests.

/// Conference standings, per game, per 100, and commented-out advanced and
/// shooting tables, laid out like the live page.
pub(crate) const SEASON_PAGE: &str = r##"<!DOCTYPE html>
<html><head><title>2023-24 NBA Season Summary</title></head><body>
<div id="all_confs_standings_E">
  <div id="div_confs_standings_E">
    <table id="confs_standings_E"><caption>Eastern Conference Table</caption>
      <thead><tr><th>Eastern Conference</th><th>W</th><th>L</th><th>W/L%</th><th>GB</th><th>PS/G</th><th>PA/G</th><th>SRS</th></tr></thead>
      <tbody>
        <tr><th>Boston Celtics*&nbsp;(1)</th><td>64</td><td>18</td><td>.780</td><td>—</td><td>120.6</td><td>109.2</td><td>10.75</td></tr>
        <tr><th>New York Knicks*&nbsp;(2)</th><td>50</td><td>32</td><td>.610</td><td>14.0</td><td>112.8</td><td>108.2</td><td>4.39</td></tr>
      </tbody>
    </table>
  </div>
</div>
<div id="all_confs_standings_W">
  <div id="div_confs_standings_W">
    <table id="confs_standings_W"><caption>Western Conference Table</caption>
      <thead><tr><th>Western Conference</th><th>W</th><th>L</th><th>W/L%</th><th>GB</th><th>PS/G</th><th>PA/G</th><th>SRS</th></tr></thead>
      <tbody>
        <tr><th>Oklahoma City Thunder*&nbsp;(1)</th><td>57</td><td>25</td><td>.695</td><td>—</td><td>120.1</td><td>112.7</td><td>7.28</td></tr>
      </tbody>
    </table>
  </div>
</div>
<div id="all_per_game_team-opponent">
  <div id="div_per_game-team">
    <table id="per_game-team"><caption>Per Game Stats Table</caption>
      <thead><tr><th>Rk</th><th>Team</th><th>G</th><th>MP</th><th>FG</th><th>PTS</th></tr></thead>
      <tbody>
        <tr><th>1</th><td>Indiana Pacers*</td><td>82</td><td>241.5</td><td>47.0</td><td>123.3</td></tr>
        <tr><th>2</th><td>Boston Celtics*</td><td>82</td><td>241.8</td><td>43.9</td><td>120.6</td></tr>
        <tr><th></th><td>League Average</td><td>82</td><td>241.6</td><td>42.2</td><td>114.2</td></tr>
      </tbody>
    </table>
  </div>
  <div id="div_per_game-opponent">
    <table id="per_game-opponent"><caption>Per Game Stats Table</caption>
      <thead><tr><th>Rk</th><th>Team</th><th>G</th><th>MP</th><th>FG</th><th>PTS</th></tr></thead>
      <tbody>
        <tr><th>1</th><td>Orlando Magic*</td><td>82</td><td>241.2</td><td>39.4</td><td>108.4</td></tr>
      </tbody>
    </table>
  </div>
</div>
<div id="all_per_poss_team-opponent">
  <div id="div_per_poss-team">
    <table id="per_poss-team"><caption>Per 100 Poss Stats Table</caption>
      <thead><tr><th>Rk</th><th>Team</th><th>G</th><th>MP</th><th>FG</th><th>PTS</th></tr></thead>
      <tbody>
        <tr><th>1</th><td>Boston Celtics*</td><td>82</td><td>19830</td><td>44.3</td><td>122.2</td></tr>
        <tr><th>2</th><td>Indiana Pacers*</td><td>82</td><td>19805</td><td>46.5</td><td>121.8</td></tr>
      </tbody>
    </table>
  </div>
  <div id="div_per_poss-opponent">
    <table id="per_poss-opponent"><caption>Per 100 Poss Stats Table</caption>
      <thead><tr><th>Rk</th><th>Team</th><th>G</th><th>MP</th><th>FG</th><th>PTS</th></tr></thead>
      <tbody>
        <tr><th>1</th><td>Minnesota Timberwolves*</td><td>82</td><td>19780</td><td>40.8</td><td>108.4</td></tr>
      </tbody>
    </table>
  </div>
</div>
<div id="all_advanced_team">
<!--
  <div id="div_advanced-team">
    <table id="advanced-team"><caption>Advanced Stats Table</caption>
      <thead>
        <tr class="over_header"><th></th><th></th><th></th><th>Offense Four Factors</th><th>Defense Four Factors</th></tr>
        <tr><th>Rk</th><th>Team</th><th>Age</th><th>W</th><th>L</th><th>SRS</th><th>NRtg</th><th></th><th>eFG%</th><th>TOV%</th><th>ORB%</th><th>FT/FGA</th><th></th><th>eFG%</th><th>TOV%</th><th>DRB%</th><th>FT/FGA</th></tr>
      </thead>
      <tbody>
        <tr><th>1</th><td>Boston Celtics*</td><td>28.2</td><td>60</td><td>22</td><td>7.50</td><td>8.0</td><td></td><td>.560</td><td>11.0</td><td>28.0</td><td>.200</td><td></td><td>.510</td><td>13.0</td><td>77.0</td><td>.180</td></tr>
        <tr><th>2</th><td>Dallas Mavericks*</td><td>26.5</td><td>41</td><td>41</td><td>0.10</td><td>0.0</td><td></td><td>.540</td><td>12.5</td><td>25.0</td><td>.210</td><td></td><td>.540</td><td>12.0</td><td>75.0</td><td>.200</td></tr>
        <tr><th>3</th><td>Detroit Pistons</td><td>23.9</td><td>22</td><td>60</td><td>-7.20</td><td>-7.0</td><td></td><td>.510</td><td>14.0</td><td>22.0</td><td>.190</td><td></td><td>.570</td><td>11.0</td><td>73.0</td><td>.220</td></tr>
        <tr><th></th><td>League Average</td><td>26.9</td><td></td><td></td><td>0.00</td><td></td><td></td><td>.537</td><td>12.5</td><td>25.0</td><td>.203</td><td></td><td>.537</td><td>12.5</td><td>75.0</td><td>.200</td></tr>
      </tbody>
    </table>
  </div>
-->
</div>
<div id="all_shooting_team">
<!--
  <div id="div_shooting-team">
    <table id="shooting-team"><caption>Shooting Stats Table</caption>
      <thead>
        <tr class="over_header"><th></th><th>% of FGA by Distance</th><th>FG% by Distance</th><th>% of FG Ast'd</th><th>Dunks</th><th>Layups</th><th>Corner</th><th>Heaves</th></tr>
        <tr><th>Rk</th><th>Team</th><th>G</th><th>FG%</th><th></th><th>2P</th><th>0-3</th><th>3-10</th><th>10-16</th><th>16-3P</th><th>3P</th><th></th><th>2P</th><th>0-3</th><th>3-10</th><th>10-16</th><th>16-3P</th><th>3P</th><th></th><th>2P</th><th>3P</th><th></th><th>%FGA</th><th>Md.</th><th></th><th>%FGA</th><th>Md.</th><th></th><th>%3PA</th><th>3P%</th><th></th><th>Att.</th><th>Md.</th></tr>
      </thead>
      <tbody>
        <tr><th>1</th><td>Boston Celtics*</td><td>82</td><td>.487</td><td></td><td>.526</td><td>.245</td><td>.138</td><td>.077</td><td>.066</td><td>.474</td><td></td><td>.580</td><td>.710</td><td>.470</td><td>.450</td><td>.420</td><td>.388</td><td></td><td>.490</td><td>.870</td><td></td><td>.070</td><td>345</td><td></td><td>.210</td><td>1270</td><td></td><td>.190</td><td>.390</td><td></td><td>14</td><td>1</td></tr>
      </tbody>
    </table>
  </div>
-->
</div>
<div id="all_shooting_opponent">
<!--
  <div id="div_shooting-opponent">
    <table id="shooting-opponent"><caption>Opponent Shooting Stats Table</caption>
      <thead>
        <tr class="over_header"><th></th><th>% of FGA by Distance</th><th>FG% by Distance</th><th>% of FG Ast'd</th><th>Dunks</th><th>Layups</th><th>Corner</th><th>Heaves</th></tr>
        <tr><th>Rk</th><th>Team</th><th>G</th><th>FG%</th><th></th><th>2P</th><th>0-3</th><th>3-10</th><th>10-16</th><th>16-3P</th><th>3P</th><th></th><th>2P</th><th>0-3</th><th>3-10</th><th>10-16</th><th>16-3P</th><th>3P</th><th></th><th>2P</th><th>3P</th><th></th><th>%FGA</th><th>Md.</th><th></th><th>%FGA</th><th>Md.</th><th></th><th>%3PA</th><th>3P%</th><th></th><th>Att.</th><th>Md.</th></tr>
      </thead>
      <tbody>
        <tr><th>1</th><td>Orlando Magic*</td><td>82</td><td>.451</td><td></td><td>.590</td><td>.260</td><td>.150</td><td>.090</td><td>.090</td><td>.410</td><td></td><td>.520</td><td>.680</td><td>.430</td><td>.410</td><td>.400</td><td>.360</td><td></td><td>.500</td><td>.860</td><td></td><td>.060</td><td>300</td><td></td><td>.230</td><td>1300</td><td></td><td>.220</td><td>.370</td><td></td><td>12</td><td>0</td></tr>
      </tbody>
    </table>
  </div>
-->
</div>
</body></html>"##;

/// Older season layout: division standings only.
pub(crate) const DIVISION_PAGE: &str = r##"<!DOCTYPE html>
<html><body>
<div id="all_divs_standings_E">
  <table id="divs_standings_E"><caption>Eastern Conference Table</caption>
    <thead><tr><th>Eastern Conference</th><th>W</th><th>L</th><th>W/L%</th><th>GB</th><th>SRS</th></tr></thead>
    <tbody>
      <tr class="thead"><th colspan="6">Atlantic Division</th></tr>
      <tr><th>Philadelphia 76ers*</th><td>56</td><td>26</td><td>.683</td><td>—</td><td>5.04</td></tr>
      <tr class="thead"><th colspan="6">Central Division</th></tr>
      <tr><th>Milwaukee Bucks*</th><td>52</td><td>30</td><td>.634</td><td>—</td><td>4.84</td></tr>
    </tbody>
  </table>
</div>
<div id="all_divs_standings_W">
  <table id="divs_standings_W"><caption>Western Conference Table</caption>
    <thead><tr><th>Western Conference</th><th>W</th><th>L</th><th>W/L%</th><th>GB</th><th>SRS</th></tr></thead>
    <tbody>
      <tr class="thead"><th colspan="6">Pacific Division</th></tr>
      <tr><th>Los Angeles Lakers*</th><td>60</td><td>22</td><td>.732</td><td>—</td><td>6.60</td></tr>
    </tbody>
  </table>
</div>
</body></html>"##;
